//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/flexdock/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Console log filter used when RUST_LOG is unset (e.g., "warn", "flexdock=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Global attribute overrides, keyed like the `global` section of a layout
    /// document (e.g., `splitterSize: 4`). New models take them as is, loaded
    /// documents take them for keys their own `global` section leaves out.
    #[serde(default)]
    pub defaults: Map<String, Value>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            defaults: Map::new(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Fill keys missing from a document's `global` section with the configured
    /// defaults. Keys the document sets win. Non-object documents are left alone.
    pub fn apply_defaults(&self, document: &mut Value) {
        if self.defaults.is_empty() {
            return;
        }
        let Some(doc) = document.as_object_mut() else {
            return;
        };
        let global = doc
            .entry("global")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(global) = global.as_object_mut() else {
            return;
        };
        for (key, value) in &self.defaults {
            global.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to `~/.config/flexdock/config.yaml`
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }
}
