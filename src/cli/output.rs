//! Output formatting
//!
//! Global output mode (quiet / JSON / verbosity), status glyphs and the
//! `print_*` helpers used by commands.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output configuration chosen on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Machine-readable output on stdout
    pub json: bool,
    /// `-v` count
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Make this configuration visible to [`is_quiet`] and [`is_json`]
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }

    /// Default tracing directive for this verbosity
    ///
    /// `RUST_LOG` still wins for anything it names.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Whether quiet mode is on
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether JSON output is on
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Print a success line
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print an informational line
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::INFO);
    }
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {message}", status::WARNING);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if !is_quiet() {
        println!("  {message}");
    }
}

/// Print an error and its causes to stderr
///
/// Shown even in quiet mode.
pub fn display_error(error: &anyhow::Error) {
    if is_json() {
        let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        let json = serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "causes": causes,
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return;
    }

    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
