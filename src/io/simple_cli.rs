use crate::core::rasterizer::LineAlgorithm;
use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::RenderSettings;
use clap::Parser;
use log::info;

const EXAMPLE_CONFIG_PATH: &str = "example_config.toml";

/// Wireframe software renderer. Reads a TOML config and writes PNG frames.
#[derive(Parser, Debug, Default)]
#[command(name = "softengine")]
#[command(about = "CPU wireframe and point-cloud renderer")]
pub struct SimpleCli {
    /// Config file path (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Write example_config.toml and render with it
    #[arg(long)]
    pub use_example_config: bool,

    /// Number of frames to render
    #[arg(short, long)]
    pub frames: Option<usize>,

    /// OBJ file to render instead of the built-in cube
    #[arg(long, value_name = "FILE")]
    pub obj: Option<String>,

    /// Directory for saved frames
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Draw every mesh as a point cloud
    #[arg(long)]
    pub point_cloud: bool,

    /// Use midpoint subdivision instead of Bresenham for edges
    #[arg(long)]
    pub midpoint: bool,
}

impl SimpleCli {
    /// Parses the command line and returns the settings for this run.
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if self.use_example_config {
            TomlConfigLoader::create_example_config(EXAMPLE_CONFIG_PATH)?;
            info!("Wrote example config to {}", EXAMPLE_CONFIG_PATH);
            TomlConfigLoader::load_from_file(EXAMPLE_CONFIG_PATH)?
        } else if let Some(config_path) = &self.config {
            info!("Loading config {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("{}: {}", config_path, e))?
        } else {
            info!("No config given, using defaults");
            RenderSettings::default()
        };

        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    fn apply_overrides(self, settings: &mut RenderSettings) {
        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if let Some(obj) = self.obj {
            settings.obj = Some(obj);
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        if self.point_cloud {
            settings.point_cloud = true;
        }
        if self.midpoint {
            settings.line_algorithm = LineAlgorithm::Midpoint;
        }
    }
}
