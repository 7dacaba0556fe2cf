//! Error types for multiflash
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a flashing run before or during target selection
#[derive(Error, Debug)]
pub enum FlashError {
    /// Enumeration found no serial devices
    #[error("No devices found!")]
    DiscoveryEmpty,

    /// Interactive selection was not device numbers, or named no listed device
    #[error("Invalid selection '{input}': expected listed device numbers separated by spaces")]
    InvalidSelection { input: String },

    /// An explicit target list was empty
    #[error("No devices to flash!")]
    EmptySelection,

    /// Reading operator input or writing prompts failed
    #[error("Operator I/O failed")]
    Io(#[from] std::io::Error),
}

/// Reasons a single device upload failed
///
/// These never abort a run; they are recorded against the device.
#[derive(Error, Debug)]
pub enum UploadFailure {
    /// Upload tool could not be located
    #[error("Upload tool '{tool}' is not installed or not in PATH")]
    NotFound { tool: String },

    /// Upload tool could not be started or waited on
    #[error("Failed to run '{tool}': {error}")]
    Spawn { tool: String, error: String },

    /// Upload tool exited unsuccessfully
    #[error("'{tool}' exited with {status}")]
    ExitStatus { tool: String, status: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Device name pattern is not a valid regex
    #[error("Invalid device pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },
}
