//! Common test utilities and helpers
//!
//! Every test gets its own bench: a fake device directory, a firmware
//! project directory holding a fake upload tool, and an empty config
//! directory so the user's real `config.toml` never leaks in.

#![allow(dead_code)]

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Fake PlatformIO: records its arguments and fails for ports listed in `fail.txt`
#[cfg(unix)]
const FAKE_TOOL: &str = r#"#!/bin/sh
echo "$@" >> calls.log
port=""
while [ $# -gt 0 ]; do
    if [ "$1" = "--upload-port" ]; then
        port="$2"
    fi
    shift
done
echo "fake upload to $port"
if [ -f fail.txt ] && grep -qxF "$port" fail.txt; then
    exit 1
fi
exit 0
"#;

/// Test bench for running the multiflash binary
pub struct TestBench {
    /// Temporary root holding everything below
    pub dir: TempDir,
}

impl TestBench {
    /// Create a bench with empty device, project and config directories
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        dir.child("dev").create_dir_all().expect("Failed to create dev dir");
        dir.child("project")
            .create_dir_all()
            .expect("Failed to create project dir");
        dir.child("config")
            .create_dir_all()
            .expect("Failed to create config dir");

        let bench = Self { dir };
        bench.install_tool();
        bench
    }

    #[cfg(unix)]
    fn install_tool(&self) {
        use std::os::unix::fs::PermissionsExt;

        let tool = self.tool_path();
        std::fs::write(&tool, FAKE_TOOL).expect("Failed to write fake tool");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
    }

    #[cfg(not(unix))]
    fn install_tool(&self) {}

    /// Path of the fake upload tool
    pub fn tool_path(&self) -> PathBuf {
        self.dir.path().join("fake-pio")
    }

    /// Fake device directory
    pub fn dev_dir(&self) -> PathBuf {
        self.dir.path().join("dev")
    }

    /// Firmware project directory
    pub fn project_dir(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    /// Config directory
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Plug in a device node; returns its full path
    pub fn add_device(&self, name: &str) -> String {
        let child = self.dir.child("dev").child(name);
        child.touch().expect("Failed to create device node");
        child.path().display().to_string()
    }

    /// Make the fake tool fail for `port`
    pub fn fail_port(&self, port: &str) {
        let path = self.project_dir().join("fail.txt");
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open fail.txt");
        writeln!(file, "{port}").expect("Failed to write fail.txt");
    }

    /// Write the global config file
    pub fn write_config(&self, content: &str) {
        self.dir
            .child("config")
            .child("config.toml")
            .write_str(content)
            .expect("Failed to write config");
    }

    /// Argument lines the fake tool was called with
    pub fn tool_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.project_dir().join("calls.log"))
            .map(|s| s.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Command for the binary with the bench environment applied
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_multiflash"));
        cmd.current_dir(self.dir.path())
            .env("MULTIFLASH_CONFIG_DIR", self.config_dir())
            .env("MULTIFLASH_DEVICE_DIR", self.dev_dir())
            .env("MULTIFLASH_PROJECT_DIR", self.project_dir())
            .env("MULTIFLASH_TOOL", self.tool_path())
            .env_remove("MULTIFLASH_ENV")
            .env_remove("RUST_LOG")
            .args(args);
        cmd
    }

    /// Run the binary, feeding `stdin` as the operator's answers
    pub fn run(&self, args: &[&str], stdin: &str) -> Output {
        self.run_bytes(args, stdin.as_bytes())
    }

    /// Like [`TestBench::run`], for input that isn't valid UTF-8
    pub fn run_bytes(&self, args: &[&str], stdin: &[u8]) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute multiflash");

        {
            let mut input = child.stdin.take().expect("stdin not piped");
            // The process may exit before reading everything
            let _ = input.write_all(stdin);
        }

        child.wait_with_output().expect("Failed to wait for multiflash")
    }
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
