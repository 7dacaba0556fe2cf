//! Infrastructure layer
//!
//! Handles all I/O: the device directory, the upload tool process and the
//! terminal. Each piece implements one of the traits in [`crate::core::flash`].

pub mod devices;
pub mod dirs;
pub mod operator;
pub mod uploader;
