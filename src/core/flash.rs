//! Multi-device flashing
//!
//! Drives one firmware upload per selected device, strictly one at a time,
//! with an operator pause between devices so boards can be swapped on a
//! single port.
//!
//! The orchestrator never touches devices, processes or the terminal
//! directly. It goes through three collaborators:
//!
//! - [`DeviceSource`] lists serial device paths
//! - [`Uploader`] runs the upload tool for one device
//! - [`Operator`] shows progress and reads operator answers

use std::future::Future;
use std::io;

use super::report::FlashReport;
use super::selection::{is_affirmative, pick_by_index, MenuChoice, Selection, SelectionMode};
use crate::error::{FlashError, UploadFailure};

/// Lists serial devices currently attached
pub trait DeviceSource {
    /// Device paths in a stable order; empty when nothing is attached
    fn enumerate(&self) -> Vec<String>;
}

/// Uploads firmware to exactly one device
pub trait Uploader {
    /// Run the upload for `device` using the named build environment
    fn upload(
        &self,
        device: &str,
        environment: &str,
    ) -> impl Future<Output = Result<(), UploadFailure>>;
}

/// The person at the keyboard
pub trait Operator {
    /// Show a progress line; may be suppressed
    fn show(&mut self, line: &str);

    /// Show a line the operator needs before answering the next prompt
    fn present(&mut self, line: &str);

    /// Ask a question and return the raw answer
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Block until the operator acknowledges `prompt`
    fn acknowledge(&mut self, prompt: &str) -> io::Result<()>;
}

/// Flash options from CLI
#[derive(Debug, Clone)]
pub struct FlashOptions {
    /// How targets are chosen
    pub mode: SelectionMode,
    /// Build environment passed to the upload tool
    pub environment: String,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// How a flashing session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashOutcome {
    /// Every target was attempted
    Completed(FlashReport),
    /// Operator quit or declined; nothing was flashed
    Cancelled,
}

/// Rule printed around per-device headers and the summary
pub const SEPARATOR: &str = "============================================================";

/// Flash orchestrator
pub struct FlashOrchestrator<D, U, O> {
    devices: D,
    uploader: U,
    operator: O,
}

impl<D, U, O> FlashOrchestrator<D, U, O>
where
    D: DeviceSource,
    U: Uploader,
    O: Operator,
{
    /// Create a new orchestrator
    pub fn new(devices: D, uploader: U, operator: O) -> Self {
        Self {
            devices,
            uploader,
            operator,
        }
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (D, U, O) {
        (self.devices, self.uploader, self.operator)
    }

    /// Enumerate attached devices
    pub fn enumerate_devices(&self) -> Vec<String> {
        self.devices.enumerate()
    }

    /// Enumerate attached devices and show them as a numbered list
    pub fn list_devices(&mut self) -> Vec<String> {
        self.announce_devices(false)
    }

    /// Enumerate and print the numbered list
    ///
    /// With `always` set the list bypasses quiet mode, for when the
    /// operator is about to pick from it by number.
    fn announce_devices(&mut self, always: bool) -> Vec<String> {
        let devices = self.enumerate_devices();

        let mut lines = vec![String::new(), "=== Available Serial Ports ===".to_string()];
        if devices.is_empty() {
            lines.push("No USB serial devices found!".to_string());
        }
        lines.extend(
            devices
                .iter()
                .enumerate()
                .map(|(i, device)| format!("{}. {device}", i + 1)),
        );

        for line in &lines {
            if always {
                self.operator.present(line);
            } else {
                self.operator.show(line);
            }
        }

        devices
    }

    /// Execute a full session: select, confirm, flash
    pub async fn execute(&mut self, options: &FlashOptions) -> Result<FlashOutcome, FlashError> {
        let enumerated = match &options.mode {
            SelectionMode::Explicit(_) => Vec::new(),
            SelectionMode::All | SelectionMode::Interactive => {
                let interactive = options.mode == SelectionMode::Interactive;
                let devices = self.announce_devices(interactive);
                if devices.is_empty() {
                    return Err(FlashError::DiscoveryEmpty);
                }
                devices
            }
        };

        let targets = match self.select_targets(&options.mode, &enumerated)? {
            Selection::Targets(targets) => targets,
            Selection::Quit => {
                self.operator.show("Exiting");
                return Ok(FlashOutcome::Cancelled);
            }
        };

        if targets.is_empty() {
            return Err(FlashError::EmptySelection);
        }

        if !options.yes && !self.confirm(&targets)? {
            self.operator.show("Cancelled");
            return Ok(FlashOutcome::Cancelled);
        }

        let report = self.run(&targets, &options.environment).await;
        Ok(FlashOutcome::Completed(report))
    }

    /// Resolve the devices to flash
    ///
    /// `enumerated` is only consulted for [`SelectionMode::All`] and
    /// [`SelectionMode::Interactive`]; explicit ports are not checked
    /// against it.
    pub fn select_targets(
        &mut self,
        mode: &SelectionMode,
        enumerated: &[String],
    ) -> Result<Selection, FlashError> {
        match mode {
            SelectionMode::Explicit(ports) => Ok(Selection::Targets(ports.clone())),
            SelectionMode::All => Ok(Selection::Targets(enumerated.to_vec())),
            SelectionMode::Interactive => self.select_interactively(enumerated),
        }
    }

    fn select_interactively(&mut self, enumerated: &[String]) -> Result<Selection, FlashError> {
        for line in [
            "",
            "=== Flash Multiple Devices ===",
            "Options:",
            "  (A)ll - Flash all devices",
            "  (S)elect - Choose specific devices",
            "  (Q)uit - Exit",
        ] {
            self.operator.present(line);
        }

        let choice = self.operator.ask("Enter choice (A/S/Q): ")?;
        match MenuChoice::parse(&choice) {
            MenuChoice::All => Ok(Selection::Targets(enumerated.to_vec())),
            MenuChoice::Select => {
                let input = self
                    .operator
                    .ask("Enter device numbers separated by space (e.g., 1 2): ")?;
                let picked = pick_by_index(&input, enumerated)?;
                if picked.is_empty() {
                    return Err(FlashError::InvalidSelection { input });
                }
                Ok(Selection::Targets(picked))
            }
            MenuChoice::Quit => Ok(Selection::Quit),
        }
    }

    /// Show the targets and ask for an explicit `yes`
    pub fn confirm(&mut self, targets: &[String]) -> Result<bool, FlashError> {
        self.operator.present("");
        self.operator
            .present(&format!("Will flash {} device(s):", targets.len()));
        for (i, device) in targets.iter().enumerate() {
            self.operator.present(&format!("   {}. {device}", i + 1));
        }

        let answer = self.operator.ask("Proceed with flashing? (yes/no): ")?;
        Ok(is_affirmative(&answer))
    }

    /// Flash a single device
    ///
    /// Every failure mode of the upload tool ends up as `false`.
    pub async fn flash_one(&mut self, device: &str, environment: &str) -> bool {
        self.operator.show(SEPARATOR);
        self.operator.show(&format!("Flashing {device}..."));
        self.operator.show(SEPARATOR);

        match self.uploader.upload(device, environment).await {
            Ok(()) => {
                self.operator
                    .show(&format!("✓ Successfully flashed {device}"));
                true
            }
            Err(e) => {
                tracing::warn!(device, error = %e, "upload failed");
                self.operator
                    .show(&format!("✗ Failed to flash {device}: {e}"));
                false
            }
        }
    }

    /// Flash every target in order
    ///
    /// Uploads share a USB bus and the bootloader protocol is not safe for
    /// parallel access, so each upload is awaited before the next starts.
    /// A failure is recorded and the queue continues. After a success, the
    /// operator is asked to swap in the next board unless it was the last.
    /// If that pause can't be read, the remaining targets are recorded as
    /// failed without being attempted.
    pub async fn run(&mut self, targets: &[String], environment: &str) -> FlashReport {
        let mut report = FlashReport::new();
        let total = targets.len();

        for (i, device) in targets.iter().enumerate() {
            self.operator.show("");
            self.operator
                .show(&format!("Flashing device {}/{total}", i + 1));

            let success = self.flash_one(device, environment).await;
            report.record(device, success);

            if success && i + 1 < total {
                if let Err(e) = self
                    .operator
                    .acknowledge("Device flashed! Connect next device and press Enter...")
                {
                    tracing::warn!(error = %e, "operator acknowledgment failed");
                    self.operator.present(&format!(
                        "✗ Lost operator input ({e}); remaining devices were not flashed"
                    ));
                    for skipped in &targets[i + 1..] {
                        report.record(skipped, false);
                    }
                    break;
                }
            }
        }

        report
    }
}
