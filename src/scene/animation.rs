use crate::geometry::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// Everything one frame renders. The driving loop owns it and hands the renderer
/// a shared borrow, so nothing changes mid-frame.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub frame: usize,
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
}

impl SceneState {
    pub fn new(camera: Camera, meshes: Vec<Mesh>) -> Self {
        SceneState {
            frame: 0,
            camera,
            meshes,
        }
    }

    /// Produces the next frame's state with every mesh rotated by `rotation_step` radians.
    pub fn advance(self, rotation_step: &Vector3<f32>) -> Self {
        let meshes = self
            .meshes
            .into_iter()
            .map(|mesh| {
                let rotation = mesh.rotation + rotation_step;
                mesh.with_rotation(rotation)
            })
            .collect();

        SceneState {
            frame: self.frame + 1,
            camera: self.camera,
            meshes,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::primitives::cube;
    use nalgebra::Point3;

    #[test]
    fn test_advance_accumulates_rotation() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 10.0), Point3::origin());
        let mut state = SceneState::new(camera, vec![cube("Cube").unwrap()]);
        let step = Vector3::new(0.1, 0.1, 0.0);
        for _ in 0..3 {
            state = state.advance(&step);
        }
        assert_eq!(state.frame, 3);
        let rotation = state.meshes[0].rotation;
        assert!((rotation - Vector3::new(0.3, 0.3, 0.0)).norm() < 1e-6);
        assert_eq!(state.vertex_count(), 8);
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 10.0), Point3::origin());
        let state = SceneState::new(camera, vec![cube("Cube").unwrap()])
            .advance(&Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(state.meshes[0].rotation.x, 10.0);
    }
}
