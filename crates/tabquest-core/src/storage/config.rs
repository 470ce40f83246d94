//! TOML-based user settings.
//!
//! Stored at `~/.config/tabquest/config.toml`. Settings are a read-only
//! input to the tick engine -- the engine never mutates them. Every field
//! has a serde default so an older or hand-edited file loads cleanly.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::classify::Category;
use crate::error::{ConfigError, Result};

/// User-configurable thresholds and category overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Domain -> category overrides, checked before the static lists.
    #[serde(default)]
    pub custom_categories: HashMap<String, Category>,
    /// Master switch for all notifications.
    #[serde(default = "default_true")]
    pub show_notifications: bool,
    /// Per-minute +XP/-XP toasts.
    #[serde(default = "default_true")]
    pub show_xp_toasts: bool,
    /// Nagging when consecutive distracting minutes pile up.
    #[serde(default = "default_true")]
    pub show_distraction_warnings: bool,
    /// Focus-score target; days at or above it count toward a perfect week.
    #[serde(default = "default_focus_goal")]
    pub focus_goal: u8,
    /// Daily productive XP needed to keep the streak alive.
    #[serde(default = "default_daily_xp_goal")]
    pub daily_xp_goal: i64,
}

fn default_true() -> bool {
    true
}
fn default_focus_goal() -> u8 {
    80
}
fn default_daily_xp_goal() -> i64 {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_categories: HashMap::new(),
            show_notifications: true,
            show_xp_toasts: true,
            show_distraction_warnings: true,
            focus_goal: default_focus_goal(),
            daily_xp_goal: default_daily_xp_goal(),
        }
    }
}

/// Key prefix addressing the override map; the remainder of the key is the
/// domain itself (domains contain dots, so no further path splitting).
const CATEGORY_PREFIX: &str = "custom_categories.";

impl Settings {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed or the default
    /// file cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a settings value as a string.
    ///
    /// `custom_categories.<domain>` addresses one override; everything else
    /// is a top-level field name.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(domain) = key.strip_prefix(CATEGORY_PREFIX) {
            return self
                .custom_categories
                .get(domain)
                .map(|c| c.label().to_string());
        }
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key and persist.
    ///
    /// Top-level keys must already exist with a matching type;
    /// `custom_categories.<domain>` inserts or replaces one override, and an
    /// empty value removes it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(domain) = key.strip_prefix(CATEGORY_PREFIX) {
            self.set_override(key, domain, value)?;
            self.save()?;
            return Ok(());
        }

        let mut json = serde_json::to_value(&*self).map_err(crate::error::CoreError::Json)?;
        set_field(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    fn set_override(&mut self, key: &str, domain: &str, value: &str) -> Result<(), ConfigError> {
        if domain.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        if value.is_empty() {
            self.custom_categories.remove(domain);
            return Ok(());
        }
        let category = match value {
            "productive" => Category::Productive,
            "neutral" => Category::Neutral,
            "distracting" => Category::Distracting,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!(
                        "'{other}' is not a category (productive|neutral|distracting)"
                    ),
                })
            }
        };
        self.custom_categories
            .insert(domain.to_ascii_lowercase(), category);
        Ok(())
    }
}

fn set_field(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let obj = root
        .as_object_mut()
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    let existing = obj
        .get(key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    let new_value = match existing {
        serde_json::Value::Bool(_) => {
            let parsed = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as bool"),
            })?;
            serde_json::Value::Bool(parsed)
        }
        serde_json::Value::Number(_) => {
            let parsed = value.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as number"),
            })?;
            serde_json::Value::Number(parsed.into())
        }
        serde_json::Value::String(_) => serde_json::Value::String(value.to_string()),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    };

    obj.insert(key.to_string(), new_value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn empty_file_loads_all_defaults() {
        let parsed: Settings = toml::from_str("").unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn get_reads_fields_and_overrides() {
        let mut settings = Settings::default();
        settings
            .custom_categories
            .insert("youtube.com".to_string(), Category::Productive);
        assert_eq!(settings.get("focus_goal").as_deref(), Some("80"));
        assert_eq!(settings.get("daily_xp_goal").as_deref(), Some("50"));
        assert_eq!(settings.get("show_xp_toasts").as_deref(), Some("true"));
        assert_eq!(
            settings.get("custom_categories.youtube.com").as_deref(),
            Some("productive")
        );
        assert!(settings.get("missing_key").is_none());
    }

    #[test]
    fn set_field_updates_bool_and_number() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        set_field(&mut json, "show_xp_toasts", "false").unwrap();
        set_field(&mut json, "daily_xp_goal", "75").unwrap();
        let parsed: Settings = serde_json::from_value(json).unwrap();
        assert!(!parsed.show_xp_toasts);
        assert_eq!(parsed.daily_xp_goal, 75);
    }

    #[test]
    fn set_field_rejects_unknown_key() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        assert!(set_field(&mut json, "nonexistent", "1").is_err());
    }

    #[test]
    fn set_field_rejects_bad_type() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        assert!(set_field(&mut json, "focus_goal", "not_a_number").is_err());
    }

    #[test]
    fn override_insert_and_remove() {
        let mut settings = Settings::default();
        settings
            .set_override(
                "custom_categories.music.youtube.com",
                "music.youtube.com",
                "neutral",
            )
            .unwrap();
        assert_eq!(
            settings.custom_categories.get("music.youtube.com"),
            Some(&Category::Neutral)
        );
        settings
            .set_override("custom_categories.music.youtube.com", "music.youtube.com", "")
            .unwrap();
        assert!(settings.custom_categories.is_empty());
    }

    #[test]
    fn override_rejects_bad_category() {
        let mut settings = Settings::default();
        assert!(settings
            .set_override("custom_categories.x.com", "x.com", "fun")
            .is_err());
    }
}
