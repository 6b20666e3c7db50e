// File: src/config.rs
//! Host configuration, read from TOML.
//!
//! ```toml
//! default_language = "si"
//! enable_shortcuts = true
//! shortcut_key = 81
//! remember_language = true
//! preferences_path = "prefs.json"
//! log_filter = "ime_core=debug"
//! ```
//!
//! Every field is optional. The chord modifier is always Ctrl (17).

use crate::core::session::SessionConfig;
use crate::core::types::{key, LanguageMode};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImeConfig {
    pub default_language: LanguageMode,
    pub enable_shortcuts: bool,
    pub shortcut_key: u32,
    /// Restore and save the last used language through the preference store.
    pub remember_language: bool,
    pub preferences_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageMode::Literal,
            enable_shortcuts: true,
            shortcut_key: key::DEFAULT_SHORTCUT,
            remember_language: false,
            preferences_path: None,
            log_filter: None,
        }
    }
}

impl ImeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ImeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shortcut_key == key::MODIFIER {
            return Err(ConfigError::InvalidValue {
                field: "shortcut_key",
                reason: "must differ from the Ctrl modifier (17)".to_string(),
            });
        }
        if self.shortcut_key == 0 || self.shortcut_key > 255 {
            return Err(ConfigError::InvalidValue {
                field: "shortcut_key",
                reason: format!("{} is not a key code", self.shortcut_key),
            });
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            enable_shortcuts: self.enable_shortcuts,
            shortcut_key: self.shortcut_key,
        }
    }
}
