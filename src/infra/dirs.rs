//! Platform-specific directory management
//!
//! Resolves where the global `config.toml` lives. Follows the XDG Base
//! Directory Specification on Linux and standard locations on macOS.
//!
//! `MULTIFLASH_CONFIG_DIR` overrides the default config directory.

use std::env;
use std::path::PathBuf;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "MULTIFLASH_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "multiflash";

/// Config file name inside the config directory
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider for multiflash
#[derive(Debug, Clone)]
pub struct MultiflashDirs {
    config_dir: PathBuf,
}

impl MultiflashDirs {
    /// Create a new `MultiflashDirs` instance
    ///
    /// Checks the environment first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Create an instance rooted at an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/multiflash` or `~/.config/multiflash`
    /// - macOS: `~/Library/Application Support/multiflash`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Resolve config directory from environment or platform default
    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for MultiflashDirs {
    fn default() -> Self {
        Self::new()
    }
}
