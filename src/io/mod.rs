pub mod config_loader;
pub mod image_surface;
pub mod obj_loader;
pub mod render_settings;
pub mod simple_cli;
