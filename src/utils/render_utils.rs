use crate::core::renderer::Renderer;
use crate::io::image_surface::ImageSurface;
use crate::io::obj_loader::load_obj_mesh;
use crate::io::render_settings::RenderSettings;
use crate::scene::animation::SceneState;
use crate::scene::mesh::Mesh;
use crate::scene::primitives::cube;
use log::info;

/// Builds a renderer over an in-memory image of the configured size.
pub fn create_renderer(settings: &RenderSettings) -> Result<Renderer<ImageSurface>, String> {
    let width = u32::try_from(settings.width).map_err(|_| "width out of range".to_string())?;
    let height = u32::try_from(settings.height).map_err(|_| "height out of range".to_string())?;

    let renderer = Renderer::new(ImageSurface::new(width, height), settings.to_render_config()?)
        .map_err(|e| e.to_string())?;

    let config = renderer.config();
    info!(
        "Renderer {}x{}, fov {:.2}, clip [{}, {}], edges: {}",
        width,
        height,
        config.field_of_view,
        config.near_plane,
        config.far_plane,
        config.line_algorithm.as_str()
    );
    Ok(renderer)
}

/// The first frame's scene: the OBJ mesh (or the demo cube) placed and oriented per settings.
pub fn create_scene(settings: &RenderSettings) -> Result<SceneState, String> {
    let mesh = match &settings.obj {
        Some(path) => load_obj_mesh(path)?,
        None => {
            info!("No OBJ given, rendering the built-in cube");
            cube("Cube").map_err(|e| e.to_string())?
        }
    };

    let mesh: Mesh = mesh
        .with_position(settings.object_position()?)
        .with_rotation(settings.object_rotation()?);

    Ok(SceneState::new(settings.camera()?, vec![mesh]))
}
