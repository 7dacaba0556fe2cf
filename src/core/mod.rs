//! Core business logic module
//!
//! This module contains the flashing logic for multiflash.
//! It has NO direct I/O - devices, processes and the terminal are reached
//! through the traits in [`flash`], implemented in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`flash`] - Orchestrator: selection, confirmation and the run loop
//! - [`selection`] - Target selection modes and operator answer parsing
//! - [`report`] - Per-device outcomes of a run
//! - [`global_config`] - Global configuration management

pub mod flash;
pub mod global_config;
pub mod report;
pub mod selection;
