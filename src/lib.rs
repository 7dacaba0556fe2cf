//! Multiflash - flash the same firmware to several boards in one sitting
//!
//! Discovers USB serial devices, lets the operator pick which ones to
//! flash, then drives an external upload tool (PlatformIO by default)
//! once per device, strictly one device at a time.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Selection, confirmation and the flashing run loop (no I/O)
//! - [`infra`] - Device enumeration, the upload tool and the terminal
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
