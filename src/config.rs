use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Device whose settings are loaded and saved.
    pub device_id: String,
    /// JSON file holding the per-device settings.
    pub settings_path: PathBuf,
    /// Default tracing filter when neither RUST_LOG nor -v/-q is given.
    pub log_level: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            device_id: "default".to_string(),
            settings_path: PathBuf::from("stdf-filter-settings.json"),
            log_level: "warn".to_string(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<FilterConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(&path, "device_id = \"tester-07\"\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.device_id, "tester-07");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(&path, "device_id = [").unwrap();
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_unreadable_file_is_read_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_config(Some(dir.path().join("nope.toml").as_path())),
            Err(ConfigError::Read { .. })
        ));
    }
}
