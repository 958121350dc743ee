use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use facemorph_core::{Corner, DVec2, DVec3, Mesh, Triangle};
use obj::raw::object::Polygon;
use obj::raw::{parse_obj, RawObj};
use tracing::debug;

use crate::error::LoadError;

/// Load an OBJ file into a single triangle mesh.
///
/// Positions, normals and texture coordinates keep the file's order, so
/// position `i` is the file's `i`-th `v` line whether or not a face uses it.
/// Morph targets rely on this to line up with their base. Polygons are split
/// into triangle fans. Objects and groups share the file-wide arrays.
pub fn load_mesh(path: &Path) -> Result<Mesh, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let raw = parse_obj(BufReader::new(file))
        .map_err(|e| LoadError::Obj(path.to_path_buf(), e.to_string()))?;

    let mesh = convert(&raw);
    mesh.validate().map_err(|e| LoadError::Malformed(path.to_path_buf(), e))?;

    debug!(
        "OBJ '{}': {} positions, {} normals, {} texcoords, {} polygons -> {} triangles",
        path.display(),
        mesh.positions.len(),
        mesh.normals.len(),
        mesh.texcoords.len(),
        raw.polygons.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

fn convert(raw: &RawObj) -> Mesh {
    let positions = raw
        .positions
        .iter()
        .map(|&(x, y, z, _)| DVec3::new(x.into(), y.into(), z.into()))
        .collect();
    let normals = raw
        .normals
        .iter()
        .map(|&(x, y, z)| DVec3::new(x.into(), y.into(), z.into()))
        .collect();
    let texcoords = raw
        .tex_coords
        .iter()
        .map(|&(u, v, _)| DVec2::new(u.into(), v.into()))
        .collect();

    let mut faces = Vec::with_capacity(raw.polygons.len());
    for polygon in &raw.polygons {
        triangulate(&corners(polygon), &mut faces);
    }

    Mesh {
        positions,
        normals,
        texcoords,
        faces,
    }
}

/// Corners of one polygon. Attributes the face does not reference stay `None`.
fn corners(polygon: &Polygon) -> Vec<Corner> {
    let index = |i: usize| i as u32;
    match polygon {
        Polygon::P(v) => v
            .iter()
            .map(|&p| Corner::position_only(index(p)))
            .collect(),
        Polygon::PT(v) => v
            .iter()
            .map(|&(p, t)| Corner {
                position: index(p),
                normal: None,
                texcoord: Some(index(t)),
            })
            .collect(),
        Polygon::PN(v) => v
            .iter()
            .map(|&(p, n)| Corner {
                position: index(p),
                normal: Some(index(n)),
                texcoord: None,
            })
            .collect(),
        Polygon::PTN(v) => v
            .iter()
            .map(|&(p, t, n)| Corner::new(index(p), index(n), index(t)))
            .collect(),
    }
}

/// Split a convex polygon into a fan around its first corner.
fn triangulate(corners: &[Corner], faces: &mut Vec<Triangle>) {
    if let Some((&first, rest)) = corners.split_first() {
        for pair in rest.windows(2) {
            faces.push([first, pair[0], pair[1]]);
        }
    }
}

/// Naming scheme for a numbered set of meshes: `<dir>/<index>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSetPattern {
    pub dir: PathBuf,
    pub extension: String,
}

impl MeshSetPattern {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Path of the mesh with the given zero-based index.
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", index, self.extension))
    }
}

/// Load meshes `0..count` of a numbered set, in index order.
///
/// Stops at the first failure; meshes loaded before it are dropped.
pub fn load_mesh_set(pattern: &MeshSetPattern, count: usize) -> Result<Vec<Mesh>, LoadError> {
    let meshes = (0..count)
        .map(|i| load_mesh(&pattern.path(i)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Loaded {} meshes from '{}'",
        meshes.len(),
        pattern.dir.display()
    );

    Ok(meshes)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    pub(crate) const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/1 3/3/1
";

    pub(crate) fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loads_single_triangle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "tri.obj", TRIANGLE_OBJ);

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(
            mesh.positions,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y]
        );
        assert_eq!(mesh.normals, vec![DVec3::Z]);
        assert_eq!(mesh.texcoords.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.faces[0][2], Corner::new(2, 0, 2));
    }

    #[test]
    fn test_triangulates_quads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.has_normals());
        assert!(!mesh.has_texcoords());
    }

    #[test]
    fn test_objects_share_file_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "two.obj",
            "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
             o b\nv 5 0 0\nv 6 0 0\nv 5 1 0\nf 4 5 6\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.faces[1][0].position, 3);
        assert_eq!(mesh.positions[3], DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_positions_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "order.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 2 4 3\nf 1 2 3\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(
            mesh.positions,
            vec![
                DVec3::ZERO,
                DVec3::X,
                DVec3::Y,
                DVec3::new(1.0, 1.0, 0.0)
            ]
        );
        let first: Vec<u32> = mesh.faces[0].iter().map(|c| c.position).collect();
        assert_eq!(first, vec![1, 3, 2]);
        let second: Vec<u32> = mesh.faces[1].iter().map(|c| c.position).collect();
        assert_eq!(second, vec![0, 1, 2]);
    }

    #[test]
    fn test_unreferenced_vertices_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "spare.obj",
            "v 9 9 9\nv 0 0 0\nv 1 0 0\nv 0 1 0\nv 7 7 7\nf 2 3 4\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.positions[0], DVec3::splat(9.0));
        assert_eq!(mesh.positions[4], DVec3::splat(7.0));
        assert_eq!(mesh.faces[0][0].position, 1);
    }

    #[test]
    fn test_faces_without_normals_keep_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "mixed.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 2 4 3\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.faces[0].iter().all(|c| c.normal == Some(0)));
        assert!(mesh.faces[1].iter().all(|c| c.normal.is_none()));
        assert!(mesh.faces[1].iter().all(|c| c.texcoord.is_none()));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "range.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n");

        match load_mesh(&path).unwrap_err() {
            LoadError::Obj(p, _) | LoadError::Malformed(p, _) => assert_eq!(p, path),
            other => panic!("expected Obj or Malformed, got: {:?}", other),
        }
    }

    #[test]
    fn test_same_path_loads_equal_meshes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "tri.obj", TRIANGLE_OBJ);

        let mut a = load_mesh(&path).unwrap();
        let b = load_mesh(&path).unwrap();
        assert_eq!(a, b);

        a.positions[0] = DVec3::ONE;
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = load_mesh(Path::new("/nonexistent/mesh.obj"));
        match result.unwrap_err() {
            LoadError::NotFound(_) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_parser_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.obj", "v 0 zero 0\nf 1 1 1\n");

        match load_mesh(&path).unwrap_err() {
            LoadError::Obj(p, message) => {
                assert_eq!(p, path);
                assert!(!message.is_empty());
            }
            other => panic!("expected Obj error, got: {:?}", other),
        }
    }

    #[test]
    fn test_mesh_set_paths() {
        let pattern = MeshSetPattern::new("faces", "obj");
        assert_eq!(pattern.path(0), PathBuf::from("faces/0.obj"));
        assert_eq!(pattern.path(12), PathBuf::from("faces/12.obj"));
    }

    #[test]
    fn test_empty_mesh_set() {
        let pattern = MeshSetPattern::new("/nonexistent", "obj");
        let meshes = load_mesh_set(&pattern, 0).unwrap();
        assert!(meshes.is_empty());
    }

    #[test]
    fn test_mesh_set_stops_at_first_missing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "0.obj", TRIANGLE_OBJ);
        write(dir.path(), "2.obj", TRIANGLE_OBJ);

        let pattern = MeshSetPattern::new(dir.path(), "obj");
        assert_eq!(load_mesh_set(&pattern, 1).unwrap().len(), 1);

        match load_mesh_set(&pattern, 3).unwrap_err() {
            LoadError::NotFound(p) => assert_eq!(p, pattern.path(1)),
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }
}
