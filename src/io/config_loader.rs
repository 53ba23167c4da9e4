use crate::core::rasterizer::LineAlgorithm;
use crate::io::render_settings::RenderSettings;
use std::path::Path;
use toml::Value;

/// Reads and writes `RenderSettings` as TOML.
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::load_from_content(&content)
    }

    /// Missing sections and keys keep their defaults.
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Writes the default settings, with a short spin animation, as a starting point.
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        let settings = RenderSettings {
            frames: 30,
            save_every: 10,
            ..Default::default()
        };

        Self::save_to_file(&settings, path)
            .map_err(|e| format!("Failed to create example config: {}", e))
    }

    // ===== TOML -> RenderSettings =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        if let Some(files) = Self::section(&toml, "files")? {
            Self::parse_files_section(&mut settings, files)?;
        }
        if let Some(render) = Self::section(&toml, "render")? {
            Self::parse_render_section(&mut settings, render)?;
        }
        if let Some(camera) = Self::section(&toml, "camera")? {
            Self::parse_camera_section(&mut settings, camera)?;
        }
        if let Some(object) = Self::section(&toml, "object")? {
            Self::parse_object_section(&mut settings, object)?;
        }
        if let Some(animation) = Self::section(&toml, "animation")? {
            Self::parse_animation_section(&mut settings, animation)?;
        }

        Ok(settings)
    }

    fn section<'a>(toml: &'a Value, name: &str) -> Result<Option<&'a toml::Table>, String> {
        match toml.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_table()
                .map(Some)
                .ok_or_else(|| format!("[{}] must be a table", name)),
        }
    }

    fn parse_files_section(
        settings: &mut RenderSettings,
        files: &toml::Table,
    ) -> Result<(), String> {
        if let Some(obj) = get_str(files, "obj")? {
            settings.obj = Some(obj.to_string());
        }
        if let Some(output) = get_str(files, "output")? {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = get_str(files, "output_dir")? {
            settings.output_dir = output_dir.to_string();
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = get_usize(render, "width")? {
            settings.width = width;
        }
        if let Some(height) = get_usize(render, "height")? {
            settings.height = height;
        }
        if let Some(fov) = get_f32(render, "fov")? {
            settings.fov = fov;
        }
        if let Some(near) = get_f32(render, "near")? {
            settings.near = near;
        }
        if let Some(far) = get_f32(render, "far")? {
            settings.far = far;
        }
        if let Some(algorithm) = get_str(render, "line_algorithm")? {
            settings.line_algorithm = algorithm.parse::<LineAlgorithm>()?;
        }
        if let Some(point_cloud) = get_bool(render, "point_cloud")? {
            settings.point_cloud = point_cloud;
        }
        if let Some(background) = get_str(render, "background")? {
            settings.background = background.to_string();
        }
        Ok(())
    }

    fn parse_camera_section(
        settings: &mut RenderSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        if let Some(from) = get_str(camera, "from")? {
            settings.camera_from = from.to_string();
        }
        if let Some(at) = get_str(camera, "at")? {
            settings.camera_at = at.to_string();
        }
        if let Some(up) = get_str(camera, "up")? {
            settings.camera_up = up.to_string();
        }
        Ok(())
    }

    fn parse_object_section(
        settings: &mut RenderSettings,
        object: &toml::Table,
    ) -> Result<(), String> {
        if let Some(position) = get_str(object, "position")? {
            settings.object_position = position.to_string();
        }
        if let Some(rotation) = get_str(object, "rotation")? {
            settings.object_rotation = rotation.to_string();
        }
        Ok(())
    }

    fn parse_animation_section(
        settings: &mut RenderSettings,
        animation: &toml::Table,
    ) -> Result<(), String> {
        if let Some(frames) = get_usize(animation, "frames")? {
            settings.frames = frames;
        }
        if let Some(rotation_step) = get_str(animation, "rotation_step")? {
            settings.rotation_step = rotation_step.to_string();
        }
        if let Some(save_every) = get_usize(animation, "save_every")? {
            settings.save_every = save_every;
        }
        Ok(())
    }

    // ===== RenderSettings -> TOML =====

    fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        content.push_str("# softengine render configuration\n\n");

        content.push_str("[files]\n");
        if let Some(obj) = &settings.obj {
            content.push_str(&format!("obj = \"{}\"\n", obj));
        } else {
            content.push_str("# obj = \"path/to/model.obj\"  # built-in cube when unset\n");
        }
        content.push_str(&format!("output = \"{}\"\n", settings.output));
        content.push_str(&format!("output_dir = \"{}\"\n", settings.output_dir));
        content.push('\n');

        content.push_str("[render]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push_str(&format!("fov = {:?}\n", settings.fov));
        content.push_str(&format!("near = {:?}\n", settings.near));
        content.push_str(&format!("far = {:?}\n", settings.far));
        content.push_str(&format!(
            "line_algorithm = \"{}\"\n",
            settings.line_algorithm.as_str()
        ));
        content.push_str(&format!("point_cloud = {}\n", settings.point_cloud));
        content.push_str(&format!("background = \"{}\"\n", settings.background));
        content.push('\n');

        content.push_str("[camera]\n");
        content.push_str(&format!("from = \"{}\"\n", settings.camera_from));
        content.push_str(&format!("at = \"{}\"\n", settings.camera_at));
        content.push_str(&format!("up = \"{}\"\n", settings.camera_up));
        content.push('\n');

        content.push_str("[object]\n");
        content.push_str(&format!("position = \"{}\"\n", settings.object_position));
        content.push_str(&format!("rotation = \"{}\"\n", settings.object_rotation));
        content.push('\n');

        content.push_str("[animation]\n");
        content.push_str(&format!("frames = {}\n", settings.frames));
        content.push_str(&format!("rotation_step = \"{}\"\n", settings.rotation_step));
        content.push_str(&format!("save_every = {}\n", settings.save_every));

        content
    }
}

fn get_str<'a>(table: &'a toml::Table, key: &str) -> Result<Option<&'a str>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a string, got {}", key, value)),
    }
}

fn get_bool(table: &toml::Table, key: &str) -> Result<Option<bool>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a boolean, got {}", key, value)),
    }
}

/// Accepts both `1` and `1.0`.
fn get_f32(table: &toml::Table, key: &str) -> Result<Option<f32>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(f)) => Ok(Some(*f as f32)),
        Some(Value::Integer(i)) => Ok(Some(*i as f32)),
        Some(value) => Err(format!("'{}' must be a number, got {}", key, value)),
    }
}

fn get_usize(table: &toml::Table, key: &str) -> Result<Option<usize>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a non-negative integer, got {}", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_keeps_defaults() {
        let settings = TomlConfigLoader::load_from_content("").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let content = r#"
            [files]
            obj = "models/teapot.obj"

            [render]
            width = 320
            height = 200
            far = 2
            line_algorithm = "midpoint"
            point_cloud = true

            [camera]
            from = "0,3,12"

            [animation]
            frames = 60
            rotation_step = "0,0.05,0"
        "#;
        let settings = TomlConfigLoader::load_from_content(content).unwrap();
        assert_eq!(settings.obj.as_deref(), Some("models/teapot.obj"));
        assert_eq!((settings.width, settings.height), (320, 200));
        assert_eq!(settings.far, 2.0);
        assert_eq!(settings.near, 0.01);
        assert_eq!(settings.line_algorithm, LineAlgorithm::Midpoint);
        assert!(settings.point_cloud);
        assert_eq!(settings.camera_from, "0,3,12");
        assert_eq!(settings.camera_at, "0,0,0");
        assert_eq!(settings.frames, 60);
        assert_eq!(settings.save_every, 1);
    }

    #[test]
    fn test_wrong_types_are_reported() {
        let err = TomlConfigLoader::load_from_content("[render]\nwidth = \"wide\"\n").unwrap_err();
        assert!(err.contains("width"), "{}", err);

        let err = TomlConfigLoader::load_from_content("[render]\nwidth = -3\n").unwrap_err();
        assert!(err.contains("width"), "{}", err);

        let content = "[render]\nline_algorithm = \"dda\"\n";
        let err = TomlConfigLoader::load_from_content(content).unwrap_err();
        assert!(err.contains("dda"), "{}", err);

        assert!(TomlConfigLoader::load_from_content("render = 3\n").is_err());
    }

    #[test]
    fn test_saved_config_loads_back() {
        let settings = RenderSettings {
            obj: Some("cube.obj".to_string()),
            width: 800,
            fov: 1.1,
            line_algorithm: LineAlgorithm::Midpoint,
            frames: 12,
            ..Default::default()
        };
        let path = std::env::temp_dir().join("softengine_config_test.toml");
        TomlConfigLoader::save_to_file(&settings, &path).unwrap();
        let loaded = TomlConfigLoader::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
