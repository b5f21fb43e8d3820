//! TOML-based widget configuration.
//!
//! Stores everything the builder form edits:
//! - Project name, accent color, theme, and corner position
//! - The reward task list
//! - Engine timing and reward knobs
//! - The public origin used for share links and the runtime script
//!
//! Configuration is stored at `~/.config/questlayer/config.toml`.
//! Runtime progression is never written here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::reward::EngineSettings;
use crate::task::{find_by_display, starter_tasks, Task};
use crate::theme::{Position, Theme};

/// Share configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Page URL promoted by share intents; also hosts `widget-runtime.js`.
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Widget configuration.
///
/// Field order matters for TOML output: plain values, then tables, then the
/// task array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default = "starter_tasks")]
    pub tasks: Vec<Task>,
}

fn default_project_name() -> String {
    "Vortex Protocol".into()
}
fn default_accent_color() -> String {
    "#6366f1".into()
}
fn default_origin() -> String {
    "https://questlayer.app".into()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            accent_color: default_accent_color(),
            position: Position::default(),
            theme: Theme::default(),
            engine: EngineSettings::default(),
            share: ShareConfig::default(),
            tasks: starter_tasks(),
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
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

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location: `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "configuration saved");
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

    /// Set a value by dot-separated key. The result must still validate;
    /// on error `self` is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ValidationError::Empty("project_name".into()));
        }
        if !is_hex_color(&self.accent_color) {
            return Err(ValidationError::InvalidColor(self.accent_color.clone()));
        }
        if url::Url::parse(&self.share.origin).is_err() {
            return Err(ValidationError::InvalidValue {
                field: "share.origin".into(),
                message: format!("'{}' is not an absolute URL", self.share.origin),
            });
        }
        if self.engine.quest_countdown_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "engine.quest_countdown_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.engine.sample_rate == 0 {
            return Err(ValidationError::InvalidValue {
                field: "engine.sample_rate".into(),
                message: "must be positive".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.engine.master_volume) {
            return Err(ValidationError::InvalidValue {
                field: "engine.master_volume".into(),
                message: "must be between 0 and 1".into(),
            });
        }

        // Ids are compared as printed: 42 and "42" would be ambiguous on the
        // command line and in the embed payload.
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.to_string()) {
                return Err(ValidationError::DuplicateTaskId(task.id.to_string()));
            }
            task.validate()?;
        }
        Ok(())
    }

    /// Find a task by the id as typed by a user.
    pub fn find_task_by_str(&self, raw: &str) -> Option<&Task> {
        find_by_display(&self.tasks, raw)
    }

    /// Append a task after validating it against the current list.
    pub fn add_task(&mut self, task: Task) -> Result<(), ValidationError> {
        if self.find_task_by_str(&task.id.to_string()).is_some() {
            return Err(ValidationError::DuplicateTaskId(task.id.to_string()));
        }
        task.validate()?;
        self.tasks.push(task);
        Ok(())
    }

    pub fn remove_task(&mut self, id: &crate::task::TaskId) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}
