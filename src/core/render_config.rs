use crate::core::color::{self, Color4};
use crate::core::error::RenderError;
use crate::core::rasterizer::LineAlgorithm;
use nalgebra::Vector3;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Vertical field of view in radians.
    pub field_of_view: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub world_up: Vector3<f32>,
    pub line_algorithm: LineAlgorithm,
    pub force_point_cloud: bool,
    pub background: Color4,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_of_view: 0.8,
            near_plane: 0.01,
            far_plane: 1.0,
            world_up: Vector3::y(),
            line_algorithm: LineAlgorithm::Bresenham,
            force_point_cloud: false,
            background: color::black(),
        }
    }
}

impl RenderConfig {
    pub fn with_field_of_view(mut self, field_of_view: f32) -> Self {
        self.field_of_view = field_of_view;
        self
    }

    pub fn with_clip_planes(mut self, near_plane: f32, far_plane: f32) -> Self {
        self.near_plane = near_plane;
        self.far_plane = far_plane;
        self
    }

    pub fn with_world_up(mut self, world_up: Vector3<f32>) -> Self {
        self.world_up = world_up;
        self
    }

    pub fn with_line_algorithm(mut self, line_algorithm: LineAlgorithm) -> Self {
        self.line_algorithm = line_algorithm;
        self
    }

    pub fn with_point_cloud(mut self, force_point_cloud: bool) -> Self {
        self.force_point_cloud = force_point_cloud;
        self
    }

    pub fn with_background(mut self, background: Color4) -> Self {
        self.background = background;
        self
    }

    /// Rejects parameters that would produce a singular or non-finite projection.
    pub fn validate(&self) -> Result<(), RenderError> {
        let fov = self.field_of_view;
        if !fov.is_finite() || fov <= 0.0 || fov >= std::f32::consts::PI {
            return Err(RenderError::InvalidConfig(format!(
                "field of view {} must lie in (0, pi)",
                fov
            )));
        }
        if !self.near_plane.is_finite() || self.near_plane <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "near plane {} must be positive",
                self.near_plane
            )));
        }
        if !self.far_plane.is_finite() || self.far_plane <= self.near_plane {
            return Err(RenderError::InvalidConfig(format!(
                "far plane {} must lie beyond near plane {}",
                self.far_plane, self.near_plane
            )));
        }
        if !self.world_up.iter().all(|c| c.is_finite()) || self.world_up.norm() <= f32::EPSILON {
            return Err(RenderError::InvalidConfig(format!(
                "world up {:?} must be a finite non-zero vector",
                self.world_up
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_projection_constants() {
        let config = RenderConfig::default();
        assert_eq!(config.field_of_view, 0.8);
        assert_eq!(config.near_plane, 0.01);
        assert_eq!(config.far_plane, 1.0);
        assert_eq!(config.line_algorithm, LineAlgorithm::Bresenham);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_planes_and_fov() {
        assert!(RenderConfig::default().with_clip_planes(1.0, 1.0).validate().is_err());
        assert!(RenderConfig::default().with_clip_planes(0.0, 1.0).validate().is_err());
        assert!(RenderConfig::default().with_field_of_view(0.0).validate().is_err());
        assert!(RenderConfig::default().with_field_of_view(f32::NAN).validate().is_err());
        assert!(
            RenderConfig::default()
                .with_world_up(Vector3::zeros())
                .validate()
                .is_err()
        );
    }
}
