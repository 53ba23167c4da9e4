use crate::core::error::RenderError;
use nalgebra::{Point3, Vector3};

/// Triangle as three indices into its mesh's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Face { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// Renderable geometry.
///
/// Vertex and face lists are fixed at construction, where face indices are checked
/// against the vertex count. Only `position` and `rotation` change afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    /// World-space offset.
    pub position: Vector3<f32>,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll. Not wrapped.
    pub rotation: Vector3<f32>,
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point3<f32>>,
        faces: Vec<Face>,
    ) -> Result<Self, RenderError> {
        let name = name.into();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(RenderError::FaceIndexOutOfRange {
                    mesh: name,
                    face: face_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        Ok(Mesh {
            name,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            vertices,
            faces,
        })
    }

    /// A mesh without connectivity, drawn as a point cloud.
    pub fn point_cloud(name: impl Into<String>, vertices: Vec<Point3<f32>>) -> Self {
        Mesh {
            name: name.into(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            vertices,
            faces: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point3<f32>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_valid_faces_accepted() {
        let mesh = Mesh::new("tri", triangle(), vec![Face::new(0, 1, 2)]).unwrap();
        assert!(mesh.has_faces());
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.position, Vector3::zeros());
    }

    #[test]
    fn test_out_of_range_face_rejected() {
        let err = Mesh::new(
            "tri",
            triangle(),
            vec![Face::new(0, 1, 2), Face::new(0, 3, 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::FaceIndexOutOfRange {
                mesh: "tri".to_string(),
                face: 1,
                index: 3,
                vertex_count: 3,
            }
        );
    }

    #[test]
    fn test_point_cloud_keeps_transform() {
        let mesh =
            Mesh::point_cloud("cloud", triangle()).with_position(Vector3::new(1.0, 2.0, 3.0));
        assert!(!mesh.has_faces());
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.position, Vector3::new(1.0, 2.0, 3.0));
    }
}
