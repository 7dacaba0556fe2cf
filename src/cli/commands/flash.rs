//! CLI command implementation for flashing and listing devices
//!
//! Resolves settings (flag, then environment variable, then `config.toml`,
//! then built-in default), wires the real collaborators into the
//! orchestrator and renders the outcome.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::cli::output::{
    is_json, is_quiet, print_detail, print_info, print_success, print_warning, status,
};
use crate::cli::Cli;
use crate::core::flash::{FlashOptions, FlashOrchestrator, FlashOutcome, SEPARATOR};
use crate::core::global_config::GlobalConfig;
use crate::core::report::FlashReport;
use crate::infra::devices::{PortScan, SerialPortSource};
use crate::infra::dirs::MultiflashDirs;
use crate::infra::operator::{Channel, TerminalOperator};
use crate::infra::uploader::{PlatformIoUploader, ToolOutput};

/// Settings after layering CLI, environment and config file
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Build environment
    pub environment: String,
    /// Upload tool
    pub tool: String,
    /// Directory the upload tool runs in
    pub project_dir: PathBuf,
    /// Directory scanned instead of the OS serial port list
    pub device_dir: Option<PathBuf>,
    /// Device name patterns
    pub device_patterns: Vec<String>,
}

impl ResolvedSettings {
    /// Merge command-line values over the global config
    pub fn resolve(cli: &Cli, config: &GlobalConfig) -> Result<Self> {
        let project_dir = match cli
            .project_dir
            .clone()
            .or_else(|| config.upload.project_dir.clone())
        {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        Ok(Self {
            environment: cli
                .env
                .clone()
                .unwrap_or_else(|| config.environment().to_string()),
            tool: cli
                .tool
                .clone()
                .unwrap_or_else(|| config.upload_tool().to_string()),
            project_dir,
            device_dir: cli.device_dir.clone().or_else(|| config.device_dir()),
            device_patterns: config.device_patterns(),
        })
    }
}

type TerminalOrchestrator =
    FlashOrchestrator<SerialPortSource, PlatformIoUploader, TerminalOperator>;

fn build_orchestrator(cli: &Cli) -> Result<(TerminalOrchestrator, ResolvedSettings)> {
    let dirs = MultiflashDirs::new();
    let config = GlobalConfig::load(&dirs).context("Failed to load global configuration")?;
    let settings = ResolvedSettings::resolve(cli, &config)?;
    tracing::debug!(?settings, "resolved settings");

    let scan = settings
        .device_dir
        .clone()
        .map_or(PortScan::System, PortScan::Directory);
    let source = SerialPortSource::new(scan, &settings.device_patterns)?;

    // Keep stdout for the JSON document
    let (channel, tool_output) = if is_json() {
        (Channel::Stderr, ToolOutput::Stderr)
    } else {
        (Channel::Stdout, ToolOutput::Inherit)
    };
    let uploader = PlatformIoUploader::new(&settings.tool, &settings.project_dir, tool_output);
    let operator = TerminalOperator::new(channel, is_quiet());

    Ok((FlashOrchestrator::new(source, uploader, operator), settings))
}

/// Execute `--list`
pub fn list(cli: &Cli) -> Result<()> {
    let (mut orchestrator, _) = build_orchestrator(cli)?;
    let devices = orchestrator.list_devices();

    if is_json() {
        let json = serde_json::json!({
            "status": "success",
            "devices": devices,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    Ok(())
}

/// Execute a flashing session
pub async fn execute(cli: &Cli) -> Result<()> {
    let (mut orchestrator, settings) = build_orchestrator(cli)?;

    if which::which(&settings.tool).is_err() {
        print_warning(&format!(
            "Upload tool '{}' was not found in PATH; every upload will fail",
            settings.tool
        ));
    }

    let options = FlashOptions {
        mode: cli.selection_mode(),
        environment: settings.environment.clone(),
        yes: cli.yes,
    };

    let outcome = orchestrator.execute(&options).await?;

    match outcome {
        FlashOutcome::Cancelled => {
            if is_json() {
                let json = serde_json::json!({ "status": "cancelled" });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            Ok(())
        }
        FlashOutcome::Completed(report) => {
            if is_json() {
                print_json_summary(&report, &settings.environment)?;
            } else {
                print_summary(&report);
            }

            if !report.all_succeeded() {
                bail!(
                    "{} of {} device(s) failed to flash: {}",
                    report.len() - report.succeeded(),
                    report.len(),
                    report.failed().join(", ")
                );
            }
            Ok(())
        }
    }
}

fn print_summary(report: &FlashReport) {
    if is_quiet() {
        return;
    }

    println!();
    println!("{SEPARATOR}");
    println!("SUMMARY");
    println!("{SEPARATOR}");
    for result in report.results() {
        let outcome = if result.success {
            format!("{} SUCCESS", status::SUCCESS)
        } else {
            format!("{} FAILED", status::ERROR)
        };
        print_detail(&format!("{}: {outcome}", result.device));
    }
    println!();
    print_info(&format!(
        "Total: {}/{} successfully flashed",
        report.succeeded(),
        report.len()
    ));
    if report.all_succeeded() {
        print_success("All devices flashed");
    }
}

fn print_json_summary(report: &FlashReport, environment: &str) -> Result<()> {
    let json = serde_json::json!({
        "status": if report.all_succeeded() { "success" } else { "error" },
        "environment": environment,
        "results": report.results(),
        "succeeded": report.succeeded(),
        "total": report.len(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
