//! TOML-based application configuration.
//!
//! Stores:
//! - Where the journey state lives and which catalog to draw from
//! - Reminder defaults
//! - Wheel seeding
//!
//! Configuration is stored at `~/.config/elysium/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::catalog::Catalog;
use crate::error::{ConfigError, CoreError};

/// Journey storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// File name of the state JSON inside the data directory.
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Optional TOML catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// Whether a fresh journey starts with reminders on.
    #[serde(default)]
    pub enabled_by_default: bool,
    /// Local hour (0-23) at which the daily reminder is sent.
    #[serde(default = "default_reminder_hour")]
    pub hour: u32,
}

/// Wheel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Fixed seed for reproducible outcomes; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/elysium/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journey: JourneyConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
}

fn default_state_file() -> String {
    "journey.json".into()
}
fn default_reminder_hour() -> u32 {
    10
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            catalog_path: None,
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled_by_default: false,
            hour: default_reminder_hour(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent) = parent {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            // Unset optional field: take JSON literals as-is, anything else as text.
            serde_json::Value::Null => serde_json::from_str(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.into())),
            serde_json::Value::String(_) => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let load_failed = |message: String| ConfigError::LoadFailed {
                    path: path.clone(),
                    message,
                };
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate().map_err(|e| load_failed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Set a value in memory only.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Range checks serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.reminders.hour > 23 {
            return Err(ConfigError::InvalidValue {
                key: "reminders.hour".into(),
                message: format!("hour must be 0-23, got {}", self.reminders.hour),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Absolute path of the journey state file.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn state_path(&self) -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join(&self.journey.state_file))
    }

    /// The configured catalog, or the built-in one.
    ///
    /// # Errors
    /// Returns an error if a catalog path is set but cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CoreError> {
        match &self.journey.catalog_path {
            Some(path) => Catalog::load_from(std::path::Path::new(path)),
            None => Ok(Catalog::builtin()),
        }
    }
}
