use crate::core::renderer::Renderer;
use crate::io::image_surface::ImageSurface;
use crate::io::render_settings::RenderSettings;
use crate::scene::animation::SceneState;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Output path of a saved frame: `{output_dir}/{output}_{frame:03}.png`.
pub fn frame_path(settings: &RenderSettings, frame_num: usize) -> PathBuf {
    Path::new(&settings.output_dir).join(format!("{}_{:03}.png", settings.output, frame_num))
}

/// Renders `settings.frames` frames, rotating every mesh by the configured step
/// between frames, and saves the selected ones as PNG.
///
/// Stops at the first failing frame. Returns the paths that were written.
pub fn run_animation_loop(
    settings: &RenderSettings,
    mut scene: SceneState,
    renderer: &mut Renderer<ImageSurface>,
) -> Result<Vec<PathBuf>, String> {
    let rotation_step = settings.rotation_step()?;
    let total_frames = settings.frames;
    let mut saved = Vec::new();

    info!("Rendering {} frame(s)", total_frames);
    let loop_start = Instant::now();

    for frame_num in 0..total_frames {
        let frame_start = Instant::now();

        renderer.clear();
        let stats = renderer
            .render(&scene.camera, &scene.meshes)
            .map_err(|e| format!("frame {}: {}", frame_num, e))?;
        renderer
            .present()
            .map_err(|e| format!("frame {}: {}", frame_num, e))?;

        debug!(
            "Frame {}: {} edges, {} vertices, {} pixels lit, {:?}",
            scene.frame,
            stats.edges_drawn,
            stats.vertices_projected,
            renderer.frame_buffer.lit_pixels(),
            frame_start.elapsed()
        );

        if settings.should_save_frame(frame_num) {
            let path = frame_path(settings, frame_num);
            renderer.frame_buffer.surface().save_png(&path)?;
            info!("Saved {}", path.display());
            saved.push(path);
        }

        scene = scene.advance(&rotation_step);
    }

    info!(
        "Rendered {} frame(s) in {:?}",
        total_frames,
        loop_start.elapsed()
    );
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::render_utils::{create_renderer, create_scene};

    #[test]
    fn test_frame_path_format() {
        let settings = RenderSettings {
            output: "spin".to_string(),
            output_dir: "out".to_string(),
            ..Default::default()
        };
        assert_eq!(frame_path(&settings, 7), Path::new("out").join("spin_007.png"));
    }

    #[test]
    fn test_loop_saves_selected_frames() {
        let dir = std::env::temp_dir().join("softengine_animation_test");
        std::fs::create_dir_all(&dir).unwrap();
        let settings = RenderSettings {
            width: 80,
            height: 60,
            frames: 5,
            save_every: 2,
            output_dir: dir.to_string_lossy().into_owned(),
            ..Default::default()
        };

        let mut renderer = create_renderer(&settings).unwrap();
        let scene = create_scene(&settings).unwrap();
        let saved = run_animation_loop(&settings, scene, &mut renderer).unwrap();

        let expected: Vec<PathBuf> = [0, 2, 4].iter().map(|&f| frame_path(&settings, f)).collect();
        assert_eq!(saved, expected);
        for path in &saved {
            assert!(path.exists(), "{}", path.display());
        }
        assert!(renderer.frame_buffer.lit_pixels() > 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
