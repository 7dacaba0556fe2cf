//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::build_info;
use crate::core::selection::SelectionMode;

/// Multiflash - flash several ESP8266 boards with the same firmware
///
/// Without --list, --ports or --all, shows the detected devices and asks
/// which ones to flash.
#[derive(Parser, Debug)]
#[command(name = "multiflash")]
#[command(author, version, about, long_about = None)]
#[command(long_version = build_info::long_version())]
#[command(group(ArgGroup::new("mode").args(["list", "ports", "all"])))]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// List available serial devices and exit
    #[arg(short, long)]
    pub list: bool,

    /// Specific ports to flash (e.g. /dev/ttyUSB0 /dev/ttyUSB1)
    #[arg(short, long, num_args = 1.., value_name = "PORT")]
    pub ports: Option<Vec<String>>,

    /// Flash all detected devices
    #[arg(short, long)]
    pub all: bool,

    /// PlatformIO environment [default: nodemcuv2]
    #[arg(short, long, env = "MULTIFLASH_ENV", value_name = "NAME")]
    pub env: Option<String>,

    /// Firmware project directory the upload tool runs in [default: current directory]
    #[arg(short = 'C', long, env = "MULTIFLASH_PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Upload tool to invoke [default: platformio]
    #[arg(long, env = "MULTIFLASH_TOOL", value_name = "PATH")]
    pub tool: Option<String>,

    /// Scan this directory for device nodes instead of asking the OS for serial ports
    #[arg(long, env = "MULTIFLASH_DEVICE_DIR", value_name = "DIR")]
    pub device_dir: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    /// Selection mode implied by the flags
    ///
    /// Only meaningful when `--list` is not set.
    pub fn selection_mode(&self) -> SelectionMode {
        if let Some(ports) = &self.ports {
            SelectionMode::Explicit(ports.clone())
        } else if self.all {
            SelectionMode::All
        } else {
            SelectionMode::Interactive
        }
    }

    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if self.list {
            commands::flash::list(&self)
        } else {
            commands::flash::execute(&self).await
        }
    }
}
