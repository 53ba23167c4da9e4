pub mod animation_utils;
pub mod render_utils;
