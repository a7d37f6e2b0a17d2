//! Global settings of the matrix builders.
//!
//! Built-in defaults are overlaid with `hydro_setting.json` from the working
//! folder. Only integer and boolean values are read back by the crate; other
//! JSON scalars are kept so a shared settings file still loads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use super::utility::get_file_path;
use crate::error::{MatrixError, Result};

/// Number of lookback periods
pub const KEY_T_LENGTH: &str = "matrix.t_length";
/// Period length in days
pub const KEY_T_UNIT: &str = "matrix.t_unit";
pub const KEY_LOG_ACTIVE: &str = "log.active";
/// Python-style integer level, see [`crate::platform::logger`]
pub const KEY_LOG_LEVEL: &str = "log.level";
pub const KEY_LOG_CONSOLE: &str = "log.console";
pub const KEY_LOG_FILE: &str = "log.file";

const SETTING_FILENAME: &str = "hydro_setting.json";

/// One year of monthly periods, INFO logging to the console only
const DEFAULTS: [(&str, SettingValue); 6] = [
    (KEY_T_LENGTH, SettingValue::Int(12)),
    (KEY_T_UNIT, SettingValue::Int(30)),
    (KEY_LOG_ACTIVE, SettingValue::Bool(true)),
    (KEY_LOG_LEVEL, SettingValue::Int(20)),
    (KEY_LOG_CONSOLE, SettingValue::Bool(true)),
    (KEY_LOG_FILE, SettingValue::Bool(false)),
];

/// A JSON scalar stored under a settings key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Key/value settings store shared behind a lock
pub struct Settings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Defaults overlaid with the settings file of the working folder, if any.
    ///
    /// An unreadable file is logged and ignored.
    pub fn new() -> Self {
        let settings = Self::with_defaults();
        let path = get_file_path(SETTING_FILENAME);
        if path.exists() {
            match read_settings_file(&path) {
                Ok(overrides) => settings.update(overrides),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring settings file"),
            }
        }
        settings
    }

    pub fn with_defaults() -> Self {
        let values = DEFAULTS
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Defaults overlaid with the JSON object stored at `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = Self::with_defaults();
        settings.update(read_settings_file(path)?);
        Ok(settings)
    }

    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.read().ok()?.get(key).cloned()
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_int()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Override one value for the rest of the process
    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value);
        }
    }

    pub fn update(&self, overrides: HashMap<String, SettingValue>) {
        if let Ok(mut values) = self.values.write() {
            values.extend(overrides);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn read_settings_file(path: &Path) -> Result<HashMap<String, SettingValue>> {
    let content = fs::read_to_string(path)
        .map_err(|e| MatrixError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

/// Process-wide settings, read on first use
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);
