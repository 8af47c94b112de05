use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Kinds of per-device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    TestNumberFilter,
}

impl SettingType {
    /// Suffix appended to the device id to form the storage key
    pub fn key_suffix(&self) -> &'static str {
        match self {
            SettingType::TestNumberFilter => "testNumberFilter",
        }
    }
}

/// Persisted state of the test number filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestNumberFilterSetting {
    pub enabled: bool,
    pub selected_test_numbers: String,
}

pub fn storage_key(device_id: &str, setting_type: SettingType) -> String {
    format!("{device_id}{}", setting_type.key_suffix())
}

/// Where filter settings are loaded from and saved to
pub trait SettingsStore {
    fn load(&self, key: &str) -> Result<Option<TestNumberFilterSetting>, SettingsError>;
    fn save(&mut self, key: &str, setting: &TestNumberFilterSetting) -> Result<(), SettingsError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, TestNumberFilterSetting>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<TestNumberFilterSetting>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, setting: &TestNumberFilterSetting) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), setting.clone());
        Ok(())
    }
}

/// A single JSON object mapping storage keys to settings
///
/// A missing file reads as empty. An entry with the wrong shape loads as
/// absent so the caller falls back to defaults; other entries are written back
/// untouched on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, SettingsError> {
        let path_display = self.path.display().to_string();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path_display,
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| SettingsError::Json {
            path: path_display,
            source,
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<TestNumberFilterSetting>, SettingsError> {
        let Some(raw) = self.read_all()?.remove(key) else {
            return Ok(None);
        };

        match serde_json::from_value(raw) {
            Ok(setting) => Ok(Some(setting)),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed setting");
                Ok(None)
            }
        }
    }

    fn save(&mut self, key: &str, setting: &TestNumberFilterSetting) -> Result<(), SettingsError> {
        let path_display = self.path.display().to_string();
        let mut entries = self.read_all()?;
        let value = serde_json::to_value(setting).map_err(|source| SettingsError::Json {
            path: path_display.clone(),
            source,
        })?;
        entries.insert(key.to_string(), value);

        let body = serde_json::to_string_pretty(&entries).map_err(|source| SettingsError::Json {
            path: path_display.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|source| SettingsError::Io {
            path: path_display,
            source,
        })?;

        debug!(path = %self.path.display(), key, "saved setting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setting(enabled: bool, text: &str) -> TestNumberFilterSetting {
        TestNumberFilterSetting {
            enabled,
            selected_test_numbers: text.to_string(),
        }
    }

    #[test]
    fn test_storage_key_appends_suffix() {
        assert_eq!(
            storage_key("tester-01", SettingType::TestNumberFilter),
            "tester-01testNumberFilter"
        );
    }

    #[test]
    fn test_setting_uses_camel_case_fields() {
        let json = serde_json::to_value(setting(true, "1-3")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"enabled": true, "selectedTestNumbers": "1-3"})
        );
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", &setting(true, "4")).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(setting(true, "4")));
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load("any").unwrap(), None);
    }

    #[test]
    fn test_json_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("settings.json"));
        store.save("a", &setting(true, "1")).unwrap();
        store.save("b", &setting(false, "2-4")).unwrap();

        let reopened = JsonFileStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load("a").unwrap(), Some(setting(true, "1")));
        assert_eq!(reopened.load("b").unwrap(), Some(setting(false, "2-4")));
    }

    #[test]
    fn test_json_store_malformed_entry_loads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"a": {"enabled": "yes", "selectedTestNumbers": 3}, "b": {"enabled": true, "selectedTestNumbers": "7"}}"#,
        )
        .unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap(), Some(setting(true, "7")));

        store.save("c", &setting(false, "")).unwrap();
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["a"]["enabled"], "yes");
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load("a"),
            Err(SettingsError::Json { .. })
        ));
    }
}
