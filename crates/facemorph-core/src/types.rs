//! Mesh types shared by the loader and the blend engine

use glam::{DVec2, DVec3};

/// One corner of a triangle: indices into the owning mesh's attribute arrays.
///
/// Normal and texture coordinate indices are absent when the source face
/// did not reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub normal: Option<u32>,
    pub texcoord: Option<u32>,
}

impl Corner {
    /// Create a corner referencing all three attributes
    pub fn new(position: u32, normal: u32, texcoord: u32) -> Self {
        Self {
            position,
            normal: Some(normal),
            texcoord: Some(texcoord),
        }
    }

    /// Create a corner that only references a position
    pub fn position_only(position: u32) -> Self {
        Self {
            position,
            normal: None,
            texcoord: None,
        }
    }
}

/// A triangular face
pub type Triangle = [Corner; 3];

/// Which attribute array an out-of-range index pointed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    Texcoord,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::Texcoord => "texcoord",
        };
        f.write_str(name)
    }
}

/// A face corner references an attribute element that does not exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("face {face} references {attribute} {index}, but only {len} are present")]
pub struct IndexError {
    pub face: usize,
    pub attribute: Attribute,
    pub index: u32,
    pub len: usize,
}

/// An indexed triangle mesh.
///
/// Loaded once and treated as read-only afterwards; blending borrows meshes
/// and never writes to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<DVec3>,
    pub normals: Vec<DVec3>,
    pub texcoords: Vec<DVec2>,
    pub faces: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct positions (the blend-shape vertex count)
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether every corner carries a normal index
    pub fn has_normals(&self) -> bool {
        self.corners().all(|c| c.normal.is_some())
    }

    /// Whether every corner carries a texture coordinate index
    pub fn has_texcoords(&self) -> bool {
        self.corners().all(|c| c.texcoord.is_some())
    }

    /// All face corners in traversal order
    pub fn corners(&self) -> impl Iterator<Item = &Corner> + '_ {
        self.faces.iter().flatten()
    }

    /// Check that every index in `faces` points into its attribute array.
    pub fn validate(&self) -> Result<(), IndexError> {
        for (face, triangle) in self.faces.iter().enumerate() {
            for corner in triangle {
                check(face, Attribute::Position, Some(corner.position), self.positions.len())?;
                check(face, Attribute::Normal, corner.normal, self.normals.len())?;
                check(face, Attribute::Texcoord, corner.texcoord, self.texcoords.len())?;
            }
        }
        Ok(())
    }
}

fn check(face: usize, attribute: Attribute, index: Option<u32>, len: usize) -> Result<(), IndexError> {
    match index {
        Some(index) if index as usize >= len => Err(IndexError {
            face,
            attribute,
            index,
            len,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            positions: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            normals: vec![DVec3::Z],
            texcoords: vec![DVec2::ZERO, DVec2::X, DVec2::Y],
            faces: vec![[Corner::new(0, 0, 0), Corner::new(1, 0, 1), Corner::new(2, 0, 2)]],
        }
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = triangle();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.has_normals());
        assert!(mesh.has_texcoords());
    }

    #[test]
    fn test_out_of_range_normal() {
        let mut mesh = triangle();
        mesh.faces[0][1].normal = Some(4);
        let err = mesh.validate().unwrap_err();
        assert_eq!(err.face, 0);
        assert_eq!(err.attribute, Attribute::Normal);
        assert_eq!(err.index, 4);
        assert_eq!(err.len, 1);
    }

    #[test]
    fn test_missing_texcoords() {
        let mut mesh = triangle();
        mesh.faces[0][2] = Corner::position_only(2);
        assert!(mesh.validate().is_ok());
        assert!(!mesh.has_texcoords());
        assert!(!mesh.has_normals());
    }
}
