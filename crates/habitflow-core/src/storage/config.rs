//! TOML-based user configuration.
//!
//! Stores user preferences including:
//! - Timezone used to interpret "today"
//! - Active coaching persona
//! - User identity for multi-profile data files
//! - Optional phone number for reminder delivery
//!
//! Configuration is stored at `~/.config/habitflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::coach::Persona;
use crate::error::ConfigError;

/// User configuration.
///
/// Serialized to/from TOML at `~/.config/habitflow/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// IANA timezone name; calendar-day bucketing follows it.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Persona whose voice coaching messages use.
    #[serde(default)]
    pub active_persona: Persona,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// E.164 phone number for reminder channels that need one.
    #[serde(default)]
    pub phone_number: Option<String>,
}

// Default functions
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_user_id() -> String {
    "default-user".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            active_persona: Persona::default(),
            user_id: default_user_id(),
            phone_number: None,
        }
    }
}

impl UserConfig {
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        let parsed = value.parse::<bool>().map_err(|_| {
                            ConfigError::ParseFailed(format!("cannot parse '{value}' as bool"))
                        })?;
                        serde_json::Value::Bool(parsed)
                    }
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
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
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
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

    /// Set a config value by key and persist the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let cfg = UserConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: UserConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.timezone, "UTC");
        assert_eq!(parsed.active_persona, Persona::Flex);
    }

    #[test]
    fn test_empty_toml_uses_field_defaults() {
        let parsed: UserConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, UserConfig::default());
    }

    #[test]
    fn test_get_supports_dot_path_keys() {
        let cfg = UserConfig::default();
        assert_eq!(cfg.get("timezone").as_deref(), Some("UTC"));
        assert_eq!(cfg.get("active_persona").as_deref(), Some("flex"));
        assert_eq!(cfg.get("user_id").as_deref(), Some("default-user"));
        assert!(cfg.get("missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn test_set_json_value_by_path_updates_string() {
        let mut json = serde_json::to_value(UserConfig::default()).unwrap();
        UserConfig::set_json_value_by_path(&mut json, "timezone", "America/New_York").unwrap();
        assert_eq!(
            UserConfig::get_json_value_by_path(&json, "timezone").unwrap(),
            &serde_json::Value::String("America/New_York".to_string())
        );
    }

    #[test]
    fn test_set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(UserConfig::default()).unwrap();
        let result = UserConfig::set_json_value_by_path(&mut json, "nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_persona_value_parses_kebab_case() {
        let mut json = serde_json::to_value(UserConfig::default()).unwrap();
        UserConfig::set_json_value_by_path(&mut json, "active_persona", "coach-blaze").unwrap();
        let cfg: UserConfig = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.active_persona, Persona::CoachBlaze);
    }

    #[test]
    fn test_invalid_persona_value_fails_deserialization() {
        let mut json = serde_json::to_value(UserConfig::default()).unwrap();
        UserConfig::set_json_value_by_path(&mut json, "active_persona", "drill-sergeant").unwrap();
        assert!(serde_json::from_value::<UserConfig>(json).is_err());
    }

    #[test]
    fn test_none_fields_stay_out_of_toml() {
        let cfg = UserConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(!toml_str.contains("phone_number"));
    }
}
