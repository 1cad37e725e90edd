//! Configuration management for NibNab
//!
//! This module handles loading, validating, and saving the TOML
//! configuration that locates storage and tunes capture.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::ledger::LoadOrder;
use crate::store::StoreSettings;

/// Bundle identifier used to name the storage directory
pub const APP_IDENTIFIER: &str = "com.pibulus.nibnab";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding error
    #[error("Failed to encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Capture configuration
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Path to the preferences file
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where clips live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one folder per collection
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,

    /// Old storage directory copied into `root` on startup
    #[serde(default = "default_legacy_root")]
    pub legacy_root: PathBuf,

    /// Ordering applied when collections are loaded
    #[serde(default)]
    pub load_order: LoadOrder,
}

/// Clipboard capture tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Clipboard poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Clips kept per collection
    #[serde(default = "default_max_clips")]
    pub max_clips: usize,

    /// Seconds a deleted clip can be restored
    #[serde(default = "default_undo_window_secs")]
    pub undo_window_secs: u64,
}

// Default value functions
fn default_storage_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_IDENTIFIER))
        .unwrap_or_else(|| PathBuf::from("~/Library/Application Support").join(APP_IDENTIFIER))
}

fn default_legacy_root() -> PathBuf {
    PathBuf::from("~/.nibnab")
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("~/.config/nibnab/preferences.toml")
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_clips() -> usize {
    100
}

fn default_undo_window_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            legacy_root: default_legacy_root(),
            load_order: LoadOrder::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_clips: default_max_clips(),
            undo_window_secs: default_undo_window_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            capture: CaptureConfig::default(),
            preferences_path: default_preferences_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Checks in order:
    /// 1. Path from NIBNAB_CONFIG environment variable
    /// 2. ~/.config/nibnab/config.toml
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                let mut config = Self::default();
                config.expand_paths();
                Ok(config)
            }
        }
    }

    /// Load configuration with an optional explicit path
    pub fn load_config(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_from_path(&path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml_str)?;
        config.expand_paths();
        config.validate_config()?;
        Ok(config)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nibnab").join("config.toml"))
    }

    /// Find configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("NIBNAB_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        Self::default_path().filter(|p| p.exists())
    }

    /// Expand tilde in paths
    fn expand_paths(&mut self) {
        self.storage.root = expand_path(&self.storage.root);
        self.storage.legacy_root = expand_path(&self.storage.legacy_root);
        self.preferences_path = expand_path(&self.preferences_path);
    }

    /// Validate configuration values
    fn validate_config(&self) -> Result<(), ConfigError> {
        if !(50..=60_000).contains(&self.capture.poll_interval_ms) {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be between 50 and 60000".to_string(),
            ));
        }

        if self.capture.max_clips < 1 {
            return Err(ConfigError::Validation(
                "max_clips must be at least 1".to_string(),
            ));
        }
        if self.capture.max_clips > 1000 {
            return Err(ConfigError::Validation(
                "max_clips must not exceed 1000".to_string(),
            ));
        }

        if self.capture.undo_window_secs > 60 {
            return Err(ConfigError::Validation(
                "undo_window_secs must not exceed 60".to_string(),
            ));
        }

        Ok(())
    }

    /// Store tunables derived from this configuration
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            max_clips: self.capture.max_clips,
            undo_window: Duration::from_secs(self.capture.undo_window_secs),
        }
    }

    /// Clipboard poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.capture.poll_interval_ms)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write a commented example config to `path`
    pub fn generate_example_config(path: &Path, force: bool) -> Result<(), ConfigError> {
        if !force && path.exists() {
            return Err(ConfigError::Validation(
                "Config file already exists. Use --force to overwrite.".to_string(),
            ));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_example())?;
        Ok(())
    }

    /// Generate example configuration file
    pub fn generate_example() -> String {
        let config = Config::default();

        format!(
            r#"# NibNab Configuration File
# Location: ~/.config/nibnab/config.toml

# Preferences file (active color, toggles, labels)
preferences_path = "{}"

# Logging level (trace, debug, info, warn, error)
log_level = "{}"

# Storage settings
[storage]
# One folder per highlighter color lives here
root = "{}"
# Older storage copied into root on startup, then removed
legacy_root = "{}"
# "file" keeps the order clips were written in, "timestamp" sorts newest first
load_order = "file"

# Capture settings
[capture]
# Clipboard poll interval in milliseconds
poll_interval_ms = {}
# Clips kept per color
max_clips = {}
# Seconds a deleted clip can be restored
undo_window_secs = {}
"#,
            config.preferences_path.display(),
            config.log_level,
            config.storage.root.display(),
            config.storage.legacy_root.display(),
            config.capture.poll_interval_ms,
            config.capture.max_clips,
            config.capture.undo_window_secs,
        )
    }
}

/// Expand tilde in path
fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(path_str.as_ref());
    PathBuf::from(expanded.into_owned())
}
