//! Multiflash CLI - flash several boards with the same firmware
//!
//! Entry point for the multiflash command-line application.

use anyhow::Result;
use clap::Parser;

use multiflash::cli::output::{display_error, OutputConfig};
use multiflash::cli::Cli;
use multiflash::config::build_info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // Logs go to stderr so they never mix with progress or JSON on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(output_config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = build_info::GIT_SHA,
        target = build_info::TARGET_TRIPLE,
        rustc = build_info::RUSTC_SEMVER,
        "starting multiflash"
    );

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
