//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.native-dialogs/config.toml` - user-wide defaults
//! - Project: `.native-dialogs/config.toml` - overrides for one directory tree
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory name used for both config locations.
pub const CONFIG_DIR: &str = ".native-dialogs";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings shared by every backend
    pub dialogs: DialogsConfig,

    /// zenity backend settings
    pub zenity: ZenityConfig,

    /// AppleScript backend settings
    pub applescript: AppleScriptConfig,

    /// Win32 backend settings
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogsConfig {
    /// Directory the first dialog opens in
    pub initial_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZenityConfig {
    /// Chooser program name or path (default: zenity)
    pub program: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppleScriptConfig {
    /// Script interpreter (default: osascript)
    pub interpreter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    /// Window class of the application window that owns the dialogs
    pub owner_window_class: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.dialogs.initial_directory.is_some() {
            self.dialogs.initial_directory = other.dialogs.initial_directory;
        }
        if other.zenity.program.is_some() {
            self.zenity.program = other.zenity.program;
        }
        if other.applescript.interpreter.is_some() {
            self.applescript.interpreter = other.applescript.interpreter;
        }
        if other.windows.owner_window_class.is_some() {
            self.windows.owner_window_class = other.windows.owner_window_class;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.native-dialogs/config.toml)
/// 2. Global config (~/.native-dialogs/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.native-dialogs).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.native-dialogs/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.native-dialogs/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}
