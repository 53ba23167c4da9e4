use nalgebra::{Point3, Vector3};

/// Viewer state read once per frame: where the eye sits and what it looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Camera { position, target }
    }

    /// Unnormalized direction from the eye toward the target.
    pub fn view_direction(&self) -> Vector3<f32> {
        self.target - self.position
    }

    /// True when position and target coincide and no view direction exists.
    pub fn is_degenerate(&self) -> bool {
        self.view_direction().norm_squared() == 0.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(Point3::origin(), Point3::origin())
    }
}
