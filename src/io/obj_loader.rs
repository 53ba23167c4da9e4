use crate::scene::mesh::{Face, Mesh};
use log::{debug, info, warn};
use nalgebra::Point3;
use std::path::Path;

/// Loads an OBJ file as a single mesh named after the file stem.
///
/// All models in the file are merged, faces are triangulated. A file with
/// vertices but no faces comes back as a point cloud.
pub fn load_obj_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, String> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());

    info!("Loading OBJ {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)
        .map_err(|e| format!("Failed to load OBJ {}: {}", path.display(), e))?;

    let mut vertices: Vec<Point3<f32>> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let offset = vertices.len();

        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0], p[1], p[2])),
        );
        faces.extend(mesh.indices.chunks_exact(3).map(|tri| {
            Face::new(
                offset + tri[0] as usize,
                offset + tri[1] as usize,
                offset + tri[2] as usize,
            )
        }));

        debug!(
            "Model '{}': {} vertices, {} triangles",
            model.name,
            mesh.positions.len() / 3,
            mesh.indices.len() / 3
        );
    }

    if faces.is_empty() {
        // tobj only keeps positions referenced by faces
        let points = read_vertex_records(path)?;
        warn!(
            "{} has no faces, drawing {} vertices as a point cloud",
            path.display(),
            points.len()
        );
        return Ok(Mesh::point_cloud(name, points));
    }

    let mesh = Mesh::new(name, vertices, faces).map_err(|e| e.to_string())?;
    info!(
        "Loaded mesh '{}': {} vertices, {} triangles",
        mesh.name,
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Collects the `v x y z` records of an OBJ file.
fn read_vertex_records(path: &Path) -> Result<Vec<Point3<f32>>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read OBJ {}: {}", path.display(), e))?;

    let mut points = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("v") {
            continue;
        }
        let coords: Vec<f32> = fields
            .take(3)
            .map(|f| f.parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("{}:{}: bad vertex: {}", path.display(), line_no + 1, e))?;
        if coords.len() != 3 {
            return Err(format!(
                "{}:{}: vertex needs 3 coordinates",
                path.display(),
                line_no + 1
            ));
        }
        points.push(Point3::new(coords[0], coords[1], coords[2]));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(file_name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_quad_is_triangulated() {
        let path = write_temp(
            "softengine_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mesh = load_obj_mesh(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(mesh.name, "softengine_quad");
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.faces().len(), 2);
        assert!(mesh.has_faces());
    }

    #[test]
    fn test_models_are_merged_with_offsets() {
        let path = write_temp(
            "softengine_two_models.obj",
            "o first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
             o second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        );
        let mesh = load_obj_mesh(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(mesh.faces().len(), 2);
        let second = mesh.faces()[1].indices();
        assert!(second.iter().all(|&i| (3..6).contains(&i)), "{:?}", second);
        for &i in &second {
            assert_eq!(mesh.vertices()[i].z, 1.0);
        }
    }

    #[test]
    fn test_vertices_without_faces_become_point_cloud() {
        let path = write_temp("softengine_points.obj", "v 0 0 0\nv 1 2 3\nv -1 0 0.5\n");
        let mesh = load_obj_mesh(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(!mesh.has_faces());
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_obj_mesh("/nonexistent/softengine.obj").is_err());
    }
}
