use crate::core::error::RenderError;
use crate::core::frame_buffer::{DisplaySurface, FrameBuffer};
use crate::core::rasterizer::{LineAlgorithm, draw_point};
use crate::core::render_config::RenderConfig;
use crate::geometry::camera::Camera;
use crate::geometry::transform::{TransformFactory, project};
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::{Matrix4, Point2};
use std::time::Instant;

/// Rasterization path for one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterStrategy {
    /// Triangle edges from the face list.
    Wireframe(LineAlgorithm),
    /// Every vertex on its own, connectivity ignored.
    PointCloud,
}

impl RasterStrategy {
    /// Faced meshes draw as wireframes unless the config forces point clouds.
    pub fn for_mesh(mesh: &Mesh, config: &RenderConfig) -> Self {
        if mesh.has_faces() && !config.force_point_cloud {
            RasterStrategy::Wireframe(config.line_algorithm)
        } else {
            RasterStrategy::PointCloud
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub vertices_projected: usize,
    pub edges_drawn: usize,
}

/// Drives one frame: transform chain per mesh, projection, rasterization.
///
/// The driving loop calls `clear`, `render`, `present` once per displayed frame.
pub struct Renderer<S: DisplaySurface> {
    pub frame_buffer: FrameBuffer<S>,
    config: RenderConfig,
}

impl<S: DisplaySurface> Renderer<S> {
    pub fn new(surface: S, config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let mut frame_buffer = FrameBuffer::new(surface);
        frame_buffer.set_background(config.background);
        Ok(Renderer {
            frame_buffer,
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.frame_buffer.clear();
    }

    pub fn present(&mut self) -> Result<(), RenderError> {
        self.frame_buffer.present()
    }

    /// Renders `meshes` as seen from `camera` into the back buffer.
    ///
    /// Viewport, camera and every composed transform are checked before the first pixel
    /// is written, so a failed call leaves the back buffer untouched.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) -> Result<FrameStats, RenderError> {
        let start_time = Instant::now();

        if !self.frame_buffer.is_ready() {
            return Err(RenderError::UninitializedBuffer);
        }
        let width = self.frame_buffer.width;
        let height = self.frame_buffer.height;
        if width == 0 || height == 0 {
            return Err(RenderError::DegenerateViewport { width, height });
        }
        if camera.is_degenerate() {
            return Err(RenderError::DegenerateCamera);
        }

        let aspect_ratio = width as f32 / height as f32;
        let view = TransformFactory::view(&camera.position, &camera.target, &self.config.world_up);
        let projection = TransformFactory::perspective(
            aspect_ratio,
            self.config.field_of_view,
            self.config.near_plane,
            self.config.far_plane,
        );

        let transforms = meshes
            .iter()
            .map(|mesh| {
                let world = TransformFactory::world(&mesh.rotation, &mesh.position);
                let transform = TransformFactory::compose(&world, &view, &projection);
                if transform.iter().all(|v| v.is_finite()) {
                    Ok(transform)
                } else {
                    Err(RenderError::NonFiniteTransform {
                        mesh: mesh.name.clone(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = FrameStats::default();
        for (mesh, transform) in meshes.iter().zip(&transforms) {
            let projected = self.project_vertices(mesh, transform);
            stats.vertices_projected += projected.len();

            match RasterStrategy::for_mesh(mesh, &self.config) {
                RasterStrategy::Wireframe(algorithm) => {
                    stats.edges_drawn += self.draw_wireframe(mesh, &projected, algorithm)?;
                }
                RasterStrategy::PointCloud => {
                    for point in &projected {
                        draw_point(&mut self.frame_buffer, point)?;
                    }
                }
            }
            stats.meshes += 1;
        }

        debug!(
            "Rendered {} meshes ({} vertices, {} edges) in {:?}",
            stats.meshes,
            stats.vertices_projected,
            stats.edges_drawn,
            start_time.elapsed()
        );
        Ok(stats)
    }

    // ===== per-mesh passes =====

    fn project_vertices(&self, mesh: &Mesh, transform: &Matrix4<f32>) -> Vec<Point2<f32>> {
        let width = self.frame_buffer.width;
        let height = self.frame_buffer.height;
        mesh.vertices()
            .iter()
            .map(|vertex| project(vertex, transform, width, height))
            .collect()
    }

    /// Draws edges A-B, A-C, B-C of every face. Returns the number of edges drawn.
    fn draw_wireframe(
        &mut self,
        mesh: &Mesh,
        projected: &[Point2<f32>],
        algorithm: LineAlgorithm,
    ) -> Result<usize, RenderError> {
        let mut edges = 0;
        for face in mesh.faces() {
            // indices were checked in Mesh::new
            let a = projected[face.a];
            let b = projected[face.b];
            let c = projected[face.c];

            if !algorithm.draws_endpoints() {
                for corner in [&a, &b, &c] {
                    draw_point(&mut self.frame_buffer, corner)?;
                }
            }

            algorithm.draw(&mut self.frame_buffer, &a, &b)?;
            algorithm.draw(&mut self.frame_buffer, &a, &c)?;
            algorithm.draw(&mut self.frame_buffer, &b, &c)?;
            edges += 3;
        }
        Ok(edges)
    }
}
