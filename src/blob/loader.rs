//! Wavefront OBJ loading into a triangle soup.

use std::path::Path;

use log::{debug, info};

use super::mesh::TriangleSoup;
use crate::error::{Result, VasaroError};

/// Load every model of an OBJ file and flatten it into one triangle soup.
///
/// Faces are triangulated on load; materials are ignored.
pub fn load_obj(path: &Path) -> Result<TriangleSoup> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &options).map_err(|e| {
        VasaroError::Load(format!("Failed to load OBJ {}: {e}", path.display()))
    })?;

    debug!("Loaded {} OBJ models from {}", models.len(), path.display());

    let mut vertices = Vec::new();
    for model in &models {
        flatten_mesh(&model.mesh, &mut vertices).map_err(|e| {
            VasaroError::Load(format!("Model '{}' in {}: {e}", model.name, path.display()))
        })?;
    }

    if vertices.is_empty() {
        return Err(VasaroError::Load(format!(
            "{} contains no triangles",
            path.display()
        )));
    }

    let soup = TriangleSoup::new(vertices)?;
    info!(
        "Mesh {}: {} triangles",
        path.display(),
        soup.triangle_count()
    );
    Ok(soup)
}

/// Append the indexed triangles of `mesh` as flat positions.
fn flatten_mesh(mesh: &tobj::Mesh, out: &mut Vec<f32>) -> std::result::Result<(), String> {
    if mesh.indices.len() % 3 != 0 {
        return Err(format!(
            "index count {} is not a multiple of 3",
            mesh.indices.len()
        ));
    }

    let vertex_count = mesh.positions.len() / 3;
    out.reserve(mesh.indices.len() * 3);

    for &index in &mesh.indices {
        let index = index as usize;
        if index >= vertex_count {
            return Err(format!(
                "index {} out of range ({} positions)",
                index, vertex_count
            ));
        }
        out.extend_from_slice(&mesh.positions[index * 3..index * 3 + 3]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const OCTAHEDRON: &str = "\
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
f 1 3 5
f 3 2 5
f 2 4 5
f 4 1 5
f 3 1 6
f 2 3 6
f 4 2 6
f 1 4 6
";

    #[test]
    fn test_load_octahedron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("octahedron.obj");
        fs::write(&path, OCTAHEDRON).unwrap();

        let soup = load_obj(&path).unwrap();
        assert_eq!(soup.triangle_count(), 8);
        assert_eq!(soup.normals().len(), soup.vertices().len());
        // First face: v1, v3, v5
        assert_eq!(
            &soup.vertices()[..9],
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_quads_are_triangulated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        fs::write(&path, "v 1 1 1\nv -1 1 1\nv -1 -1 1\nv 1 -1 1\nf 1 2 3 4\n").unwrap();

        let soup = load_obj(&path).unwrap();
        assert_eq!(soup.triangle_count(), 2);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_obj(&dir.path().join("missing.obj")).unwrap_err();
        assert!(matches!(err, VasaroError::Load(_)));
    }

    #[test]
    fn test_file_without_faces_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.obj");
        fs::write(&path, "v 1 0 0\nv 0 1 0\n").unwrap();

        assert!(matches!(load_obj(&path), Err(VasaroError::Load(_))));
    }

    #[test]
    fn test_flatten_rejects_out_of_range_index() {
        let mesh = tobj::Mesh {
            positions: vec![0.0; 6],
            normals: vec![],
            texcoords: vec![],
            indices: vec![0, 1, 2],
            vertex_color: vec![],
            face_arities: vec![],
            texcoord_indices: vec![],
            normal_indices: vec![],
            material_id: None,
        };
        let mut out = Vec::new();
        assert!(flatten_mesh(&mesh, &mut out).is_err());
    }
}
