use crate::core::color;
use crate::core::rasterizer::LineAlgorithm;
use crate::core::render_config::RenderConfig;
use crate::geometry::camera::Camera;
use nalgebra::{Point3, Vector3};

/// Everything configurable from TOML or the command line.
///
/// Vectors stay in their "x,y,z" string form until a run needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== files =====
    /// OBJ file to render; the built-in cube when absent
    pub obj: Option<String>,
    /// Base name for saved frames
    pub output: String,
    pub output_dir: String,

    // ===== render =====
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub line_algorithm: LineAlgorithm,
    /// Draw every mesh as a point cloud
    pub point_cloud: bool,
    /// Background color "r,g,b"
    pub background: String,

    // ===== camera =====
    pub camera_from: String,
    pub camera_at: String,
    pub camera_up: String,

    // ===== object =====
    pub object_position: String,
    /// Euler angles in radians (pitch, yaw, roll)
    pub object_rotation: String,

    // ===== animation =====
    pub frames: usize,
    /// Rotation added to every mesh between frames, radians
    pub rotation_step: String,
    /// Save every Nth frame (the last frame is always saved)
    pub save_every: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            obj: None,
            output: "frame".to_string(),
            output_dir: "output".to_string(),

            width: 640,
            height: 480,
            fov: 0.8,
            near: 0.01,
            far: 1.0,
            line_algorithm: LineAlgorithm::Bresenham,
            point_cloud: false,
            background: "0,0,0".to_string(),

            camera_from: "0,0,10".to_string(),
            camera_at: "0,0,0".to_string(),
            camera_up: "0,1,0".to_string(),

            object_position: "0,0,0".to_string(),
            object_rotation: "0,0,0".to_string(),

            frames: 1,
            rotation_step: "0.1,0.1,0".to_string(),
            save_every: 1,
        }
    }
}

impl RenderSettings {
    pub fn to_render_config(&self) -> Result<RenderConfig, String> {
        let world_up =
            parse_vec3(&self.camera_up).map_err(|e| format!("Invalid camera up: {}", e))?;
        let background =
            parse_vec3(&self.background).map_err(|e| format!("Invalid background: {}", e))?;

        Ok(RenderConfig::default()
            .with_field_of_view(self.fov)
            .with_clip_planes(self.near, self.far)
            .with_world_up(world_up)
            .with_line_algorithm(self.line_algorithm)
            .with_point_cloud(self.point_cloud)
            .with_background(color::opaque(&background)))
    }

    pub fn camera(&self) -> Result<Camera, String> {
        let from =
            parse_point3(&self.camera_from).map_err(|e| format!("Invalid camera from: {}", e))?;
        let at = parse_point3(&self.camera_at).map_err(|e| format!("Invalid camera at: {}", e))?;
        Ok(Camera::new(from, at))
    }

    pub fn object_position(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.object_position).map_err(|e| format!("Invalid object position: {}", e))
    }

    pub fn object_rotation(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.object_rotation).map_err(|e| format!("Invalid object rotation: {}", e))
    }

    pub fn rotation_step(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.rotation_step).map_err(|e| format!("Invalid rotation step: {}", e))
    }

    /// Whether frame `frame_num` (0-based) gets written to disk.
    pub fn should_save_frame(&self, frame_num: usize) -> bool {
        let every = self.save_every.max(1);
        frame_num + 1 == self.frames || frame_num % every == 0
    }
}

/// Parses "x,y,z" into a vector.
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got '{}'", s));
    }
    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))?;
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

pub fn parse_point3(s: &str) -> Result<Point3<f32>, String> {
    parse_vec3(s).map(Point3::from)
}
