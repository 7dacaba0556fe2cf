//! Build metadata emitted by `build.rs`

use std::sync::OnceLock;

/// Git commit the binary was built from
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Target triple the binary was built for
pub const TARGET_TRIPLE: &str = match option_env!("VERGEN_CARGO_TARGET_TRIPLE") {
    Some(triple) => triple,
    None => "unknown",
};

/// Compiler version used for the build
pub const RUSTC_SEMVER: &str = match option_env!("VERGEN_RUSTC_SEMVER") {
    Some(version) => version,
    None => "unknown",
};

/// Version line for `--version`: package version, git sha, target and compiler
pub fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} (git {GIT_SHA}, {TARGET_TRIPLE}, rustc {RUSTC_SEMVER})",
            env!("CARGO_PKG_VERSION")
        )
    })
}
