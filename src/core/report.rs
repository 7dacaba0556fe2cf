//! Per-device outcome of a flashing run

use serde::Serialize;

/// Outcome for one targeted device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceResult {
    /// Device path
    pub device: String,
    /// Whether the upload tool exited successfully
    pub success: bool,
}

/// Outcomes of a run, one entry per target, in flashing order
///
/// A device listed twice gets two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlashReport {
    results: Vec<DeviceResult>,
}

impl FlashReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for a device
    pub fn record(&mut self, device: &str, success: bool) {
        self.results.push(DeviceResult {
            device: device.to_string(),
            success,
        });
    }

    /// All entries in flashing order
    pub fn results(&self) -> &[DeviceResult] {
        &self.results
    }

    /// Outcome of the first entry for `device`
    pub fn get(&self, device: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|r| r.device == device)
            .map(|r| r.success)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Count of successful entries
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Devices that failed, in flashing order
    pub fn failed(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.success)
            .map(|r| r.device.as_str())
            .collect()
    }

    /// True only when every entry succeeded
    ///
    /// An empty report never counts as success.
    pub fn all_succeeded(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.success)
    }
}
