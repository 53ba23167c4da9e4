use log::{error, info};
use std::fs;
use std::time::Instant;

mod core;
mod geometry;
mod io;
mod scene;
mod utils;

use io::simple_cli::SimpleCli;
use utils::animation_utils::run_animation_loop;
use utils::render_utils::{create_renderer, create_scene};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let start_time = Instant::now();

    let settings = SimpleCli::process()?;

    fs::create_dir_all(&settings.output_dir).map_err(|e| {
        format!(
            "Failed to create output directory '{}': {}",
            settings.output_dir, e
        )
    })?;

    let mut renderer = create_renderer(&settings)?;
    let scene = create_scene(&settings)?;
    info!(
        "Scene: {} mesh(es), {} vertices",
        scene.meshes.len(),
        scene.vertex_count()
    );

    let saved = run_animation_loop(&settings, scene, &mut renderer)?;

    info!(
        "Done: {} frame(s) written to {} in {:?}",
        saved.len(),
        settings.output_dir,
        start_time.elapsed()
    );
    Ok(())
}
