use crate::core::error::RenderError;
use crate::scene::mesh::{Face, Mesh};
use nalgebra::Point3;

/// Axis-aligned cube spanning [-1, 1] on every axis: 8 vertices, 12 triangles.
pub fn cube(name: &str) -> Result<Mesh, RenderError> {
    let vertices = vec![
        Point3::new(-1.0, 1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
    ];

    let faces = vec![
        // front (z = +1)
        Face::new(0, 1, 2),
        Face::new(1, 6, 2),
        // back (z = -1)
        Face::new(4, 5, 3),
        Face::new(5, 7, 3),
        // top (y = +1)
        Face::new(0, 4, 1),
        Face::new(1, 4, 5),
        // bottom (y = -1)
        Face::new(2, 6, 3),
        Face::new(6, 7, 3),
        // left (x = -1)
        Face::new(0, 2, 4),
        Face::new(2, 3, 4),
        // right (x = +1)
        Face::new(1, 5, 6),
        Face::new(5, 7, 6),
    ];

    Mesh::new(name, vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = cube("Cube").unwrap();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
    }

    #[test]
    fn test_every_face_lies_on_one_side() {
        let cube = cube("Cube").unwrap();
        for face in cube.faces() {
            let [a, b, c] = face.indices().map(|i| cube.vertices()[i]);
            let shared_axis = (0..3).any(|axis| a[axis] == b[axis] && b[axis] == c[axis]);
            assert!(shared_axis, "face {:?} is not on a cube side", face);
        }
    }
}
