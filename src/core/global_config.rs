//! Global configuration management
//!
//! Reads settings from `config.toml` in the config directory. Settings cover
//! the upload tool, the default PlatformIO environment, the firmware project
//! directory and the serial device naming patterns.
//!
//! Command-line flags and environment variables take precedence over
//! anything set here; see [`crate::cli::commands::flash`].

use crate::config::defaults;
use crate::error::ConfigError;
use crate::infra::dirs::MultiflashDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration for multiflash
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Upload tool settings
    #[serde(default)]
    pub upload: UploadConfig,

    /// Device discovery settings
    #[serde(default)]
    pub devices: DeviceConfig,
}

/// Upload tool configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadConfig {
    /// Upload tool name or path
    pub tool: Option<String>,

    /// Default PlatformIO environment
    pub environment: Option<String>,

    /// Firmware project directory the tool runs in
    pub project_dir: Option<PathBuf>,
}

/// Device discovery configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceConfig {
    /// Directory scanned instead of the OS serial port list
    pub dir: Option<PathBuf>,

    /// Regex patterns matched against port names
    pub patterns: Option<Vec<String>>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// If the config file doesn't exist, returns default configuration.
    /// If the config file exists but is invalid, returns an error.
    pub fn load(dirs: &MultiflashDirs) -> Result<Self, ConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Get the effective upload tool
    #[must_use]
    pub fn upload_tool(&self) -> &str {
        self.upload
            .tool
            .as_deref()
            .unwrap_or(defaults::DEFAULT_UPLOAD_TOOL)
    }

    /// Get the effective PlatformIO environment
    #[must_use]
    pub fn environment(&self) -> &str {
        self.upload
            .environment
            .as_deref()
            .unwrap_or(defaults::DEFAULT_ENVIRONMENT)
    }

    /// Get the device directory override, if any
    #[must_use]
    pub fn device_dir(&self) -> Option<PathBuf> {
        self.devices.dir.clone()
    }

    /// Get the effective device name patterns
    #[must_use]
    pub fn device_patterns(&self) -> Vec<String> {
        self.devices.patterns.clone().unwrap_or_else(|| {
            defaults::DEFAULT_DEVICE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }
}
