//! Persisted theme preferences (`theme.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::theme::{ThemeMode, TransitionMode};

/// User theme preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePreferences {
    pub mode: ThemeMode,
    /// Accent as `#RRGGBB`; `None` follows the system accent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    pub transitions_enabled: bool,
    pub transition_mode: TransitionMode,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Auto,
            accent: None,
            transitions_enabled: true,
            transition_mode: TransitionMode::Ripple,
        }
    }
}

impl ThemePreferences {
    /// `<config dir>/mica/theme.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("mica").join("theme.toml"))
            .ok_or(ThemeError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ThemeError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "saved theme preferences");
        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(%err, "using default theme preferences");
                Self::default()
            }
        }
    }
}
