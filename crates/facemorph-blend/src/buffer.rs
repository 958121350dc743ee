//! Face expansion into non-indexed vertex streams
//!
//! Every face corner gets its own entry, so vertices shared by adjacent faces
//! are duplicated. Streams are meant for a plain `glDrawArrays(GL_TRIANGLES)`
//! with no element buffer.

use facemorph_core::{DVec3, Mesh};

use crate::error::BlendError;
use crate::vertex::{GpuVertex, TexturedVertex};

/// Flattened output of a blend: 3 values per face corner in each buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlendedMesh {
    pub vertex_buffer: Vec<f64>,
    pub normal_buffer: Vec<f64>,
}

impl BlendedMesh {
    /// Number of emitted vertices (three per triangle)
    pub fn vertex_count(&self) -> usize {
        self.vertex_buffer.len() / 3
    }

    /// Interleave and narrow to f32 for upload
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertex_buffer
            .chunks_exact(3)
            .zip(self.normal_buffer.chunks_exact(3))
            .map(|(p, n)| GpuVertex::new(narrow3(p), narrow3(n)))
            .collect()
    }
}

/// Flattened buffers for a static textured mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TexturedBuffers {
    pub vertex_buffer: Vec<f64>,
    pub normal_buffer: Vec<f64>,
    /// 2 values per face corner
    pub texcoord_buffer: Vec<f64>,
}

impl TexturedBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertex_buffer.len() / 3
    }

    pub fn to_gpu_vertices(&self) -> Vec<TexturedVertex> {
        self.vertex_buffer
            .chunks_exact(3)
            .zip(self.normal_buffer.chunks_exact(3))
            .zip(self.texcoord_buffer.chunks_exact(2))
            .map(|((p, n), t)| {
                TexturedVertex::new(narrow3(p), narrow3(n), [t[0] as f32, t[1] as f32])
            })
            .collect()
    }
}

fn narrow3(v: &[f64]) -> [f32; 3] {
    [v[0] as f32, v[1] as f32, v[2] as f32]
}

/// Emit `positions` per corner of `mesh.faces`, looked up by position index.
///
/// `positions` may be the mesh's own or a blended set of the same length.
/// The caller has validated the indices.
pub(crate) fn expand_positions(mesh: &Mesh, positions: &[DVec3]) -> Vec<f64> {
    let mut buffer = Vec::with_capacity(mesh.faces.len() * 9);
    for corner in mesh.corners() {
        buffer.extend_from_slice(&positions[corner.position as usize].to_array());
    }
    buffer
}

/// Emit the mesh's normals per corner.
pub(crate) fn expand_normals(mesh: &Mesh) -> Result<Vec<f64>, BlendError> {
    let mut buffer = Vec::with_capacity(mesh.faces.len() * 9);
    for (face, triangle) in mesh.faces.iter().enumerate() {
        for corner in triangle {
            let index = corner.normal.ok_or(BlendError::MissingNormals { face })?;
            buffer.extend_from_slice(&mesh.normals[index as usize].to_array());
        }
    }
    Ok(buffer)
}

fn expand_texcoords(mesh: &Mesh) -> Result<Vec<f64>, BlendError> {
    let mut buffer = Vec::with_capacity(mesh.faces.len() * 6);
    for (face, triangle) in mesh.faces.iter().enumerate() {
        for corner in triangle {
            let index = corner.texcoord.ok_or(BlendError::MissingTexcoords { face })?;
            buffer.extend_from_slice(&mesh.texcoords[index as usize].to_array());
        }
    }
    Ok(buffer)
}

/// Expand a mesh without blending.
pub fn expand(mesh: &Mesh) -> Result<BlendedMesh, BlendError> {
    mesh.validate()?;
    Ok(BlendedMesh {
        normal_buffer: expand_normals(mesh)?,
        vertex_buffer: expand_positions(mesh, &mesh.positions),
    })
}

/// Expand a mesh with its texture coordinates, for textured props that are
/// drawn as loaded.
pub fn expand_textured(mesh: &Mesh) -> Result<TexturedBuffers, BlendError> {
    mesh.validate()?;
    Ok(TexturedBuffers {
        normal_buffer: expand_normals(mesh)?,
        texcoord_buffer: expand_texcoords(mesh)?,
        vertex_buffer: expand_positions(mesh, &mesh.positions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use facemorph_core::{Corner, DVec2};

    /// Two triangles sharing the edge 1-2 of a unit quad
    fn quad() -> Mesh {
        Mesh {
            positions: vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ],
            normals: vec![DVec3::Z, DVec3::NEG_Z],
            texcoords: vec![DVec2::ZERO, DVec2::X, DVec2::Y, DVec2::ONE],
            faces: vec![
                [Corner::new(0, 0, 0), Corner::new(1, 0, 1), Corner::new(2, 0, 2)],
                [Corner::new(2, 1, 2), Corner::new(1, 1, 1), Corner::new(3, 1, 3)],
            ],
        }
    }

    #[test]
    fn test_shared_vertices_are_duplicated() {
        let out = expand(&quad()).unwrap();
        assert_eq!(out.vertex_buffer.len(), 18);
        assert_eq!(out.normal_buffer.len(), 18);
        assert_eq!(out.vertex_count(), 6);
        // Vertex 2 is emitted by both faces.
        assert_eq!(&out.vertex_buffer[6..9], &[0.0, 1.0, 0.0]);
        assert_eq!(&out.vertex_buffer[9..12], &[0.0, 1.0, 0.0]);
        // Normals follow each corner's own normal index.
        assert_eq!(&out.normal_buffer[6..9], &[0.0, 0.0, 1.0]);
        assert_eq!(&out.normal_buffer[9..12], &[0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_textured_expansion() {
        let out = expand_textured(&quad()).unwrap();
        assert_eq!(out.vertex_count(), 6);
        assert_eq!(out.texcoord_buffer.len(), 12);
        assert_eq!(&out.texcoord_buffer[10..12], &[1.0, 1.0]);

        let vertices = out.to_gpu_vertices();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[5].texcoord, [1.0, 1.0]);
        assert_eq!(vertices[5].position, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_normals() {
        let mut mesh = quad();
        mesh.faces[1][0].normal = None;
        assert_eq!(
            expand(&mesh).unwrap_err(),
            BlendError::MissingNormals { face: 1 }
        );
    }

    #[test]
    fn test_missing_texcoords() {
        let mut mesh = quad();
        mesh.faces[0][2].texcoord = None;
        assert_eq!(
            expand_textured(&mesh).unwrap_err(),
            BlendError::MissingTexcoords { face: 0 }
        );
        // The untextured path does not need them.
        assert!(expand(&mesh).is_ok());
    }

    #[test]
    fn test_invalid_index() {
        let mut mesh = quad();
        mesh.faces[0][0].position = 9;
        assert!(matches!(expand(&mesh), Err(BlendError::InvalidMesh(_))));
    }
}
