//! PlatformIO upload tool
//!
//! Runs `<tool> run --target upload -e <env> --upload-port <device>` inside
//! the firmware project directory. Only the exit status is looked at; the
//! tool's own output goes straight to the terminal.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::flash::Uploader;
use crate::error::UploadFailure;

/// Where the upload tool's stdout ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutput {
    /// Share our stdout
    Inherit,
    /// Send it to our stderr, keeping stdout clean for JSON
    Stderr,
}

/// Uploader that shells out to PlatformIO (or a compatible tool)
#[derive(Debug, Clone)]
pub struct PlatformIoUploader {
    tool: String,
    project_dir: PathBuf,
    output: ToolOutput,
}

impl PlatformIoUploader {
    /// Create an uploader running `tool` in `project_dir`
    pub fn new(tool: &str, project_dir: &Path, output: ToolOutput) -> Self {
        Self {
            tool: tool.to_string(),
            project_dir: project_dir.to_path_buf(),
            output,
        }
    }

    /// Arguments passed to the tool for one device
    pub fn upload_args<'a>(device: &'a str, environment: &'a str) -> [&'a str; 7] {
        [
            "run",
            "--target",
            "upload",
            "-e",
            environment,
            "--upload-port",
            device,
        ]
    }
}

impl Uploader for PlatformIoUploader {
    async fn upload(&self, device: &str, environment: &str) -> Result<(), UploadFailure> {
        let program = which::which(&self.tool).map_err(|_| UploadFailure::NotFound {
            tool: self.tool.clone(),
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(Self::upload_args(device, environment))
            .current_dir(&self.project_dir)
            .stdin(Stdio::null());

        if self.output == ToolOutput::Stderr {
            cmd.stdout(std::io::stderr());
        }

        tracing::debug!(
            "Running {} {} in {}",
            program.display(),
            Self::upload_args(device, environment).join(" "),
            self.project_dir.display()
        );

        let status = cmd.status().await.map_err(|e| UploadFailure::Spawn {
            tool: self.tool.clone(),
            error: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(UploadFailure::ExitStatus {
                tool: self.tool.clone(),
                status: status.to_string(),
            })
        }
    }
}
