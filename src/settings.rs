use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use config::{Config, Environment, File};
use serde::Deserialize;

/// User settings, layered: built-in defaults, then the settings file, then
/// `RAYMAP_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Width of maps made by `new` when `--width` is not given.
    pub default_width: usize,
    pub default_height: usize,
    /// `env_logger` filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .set_default("default_width", 32)?
            .set_default("default_height", 32)?
            .set_default("log_level", "warn")?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RAYMAP"))
            .build()
            .wrap_err_with(|| format!("reading settings from {}", path.display()))?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let settings = Settings::load(Path::new("does-not-exist/raymap.toml")).unwrap();
        assert_eq!(settings.default_width, 32);
        assert_eq!(settings.default_height, 32);
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("raymap-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "default_width = 100\nlog_level = \"debug\"\n").unwrap();
        let settings = Settings::load(&path);
        std::fs::remove_file(&path).ok();
        let settings = settings.unwrap();
        assert_eq!(settings.default_width, 100);
        assert_eq!(settings.default_height, 32);
        assert_eq!(settings.log_level, "debug");
    }
}
