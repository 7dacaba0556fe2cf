//! Serial device discovery
//!
//! Asks the OS for its serial ports and keeps the ones whose names look
//! like USB serial adapters. A device directory can be scanned instead,
//! which is how tests and unusual setups supply their own device nodes.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::flash::DeviceSource;
use crate::error::ConfigError;

/// Where candidate device paths come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortScan {
    /// The OS serial port list
    System,
    /// Every entry of a directory
    Directory(PathBuf),
}

/// Device source filtering serial ports by name
#[derive(Debug, Clone)]
pub struct SerialPortSource {
    scan: PortScan,
    patterns: Vec<Regex>,
}

impl SerialPortSource {
    /// Create a source matching port names against `patterns`
    pub fn new(scan: PortScan, patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    error: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { scan, patterns })
    }

    fn matches(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .or_else(|| path.to_str());
        name.is_some_and(|name| self.patterns.iter().any(|p| p.is_match(name)))
    }

    fn candidates(&self) -> Vec<PathBuf> {
        match &self.scan {
            PortScan::System => match serial2_tokio::SerialPort::available_ports() {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!("Cannot list serial ports: {}", e);
                    Vec::new()
                }
            },
            PortScan::Directory(dir) => match fs::read_dir(dir) {
                Ok(entries) => entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .collect(),
                Err(e) => {
                    tracing::warn!("Cannot list {}: {}", dir.display(), e);
                    Vec::new()
                }
            },
        }
    }
}

impl DeviceSource for SerialPortSource {
    fn enumerate(&self) -> Vec<String> {
        let mut devices: Vec<String> = self
            .candidates()
            .into_iter()
            .filter(|path| self.matches(path))
            .map(|path| path.display().to_string())
            .collect();

        // Same order `ls` would give
        devices.sort();
        tracing::debug!(scan = ?self.scan, "Found {} device(s)", devices.len());
        devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn linux_patterns() -> Vec<String> {
        vec![r"^ttyUSB\d+$".to_string(), r"^ttyACM\d+$".to_string()]
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn scan(dir: &Path) -> PortScan {
        PortScan::Directory(dir.to_path_buf())
    }

    #[test]
    fn test_enumerate_matching_entries_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["ttyUSB1", "ttyS0", "ttyUSB0", "ttyACM0", "null", "ttyUSBx"] {
            touch(temp.path(), name);
        }

        let source = SerialPortSource::new(scan(temp.path()), &linux_patterns()).unwrap();
        let devices = source.enumerate();

        let expected: Vec<String> = ["ttyACM0", "ttyUSB0", "ttyUSB1"]
            .iter()
            .map(|n| temp.path().join(n).display().to_string())
            .collect();
        assert_eq!(devices, expected);
    }

    #[test]
    fn test_enumerate_empty_dir() {
        let temp = TempDir::new().unwrap();
        let source = SerialPortSource::new(scan(temp.path()), &linux_patterns()).unwrap();
        assert!(source.enumerate().is_empty());
    }

    #[test]
    fn test_missing_dir_is_empty_not_error() {
        let temp = TempDir::new().unwrap();
        let source =
            SerialPortSource::new(scan(&temp.path().join("nope")), &linux_patterns()).unwrap();
        assert!(source.enumerate().is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = SerialPortSource::new(PortScan::System, &["(unclosed".to_string()]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_windows_port_names_match_by_name() {
        let source = SerialPortSource::new(PortScan::System, &[r"^COM\d+$".to_string()]).unwrap();
        assert!(source.matches(Path::new("COM3")));
        assert!(!source.matches(Path::new("LPT1")));
    }

    #[test]
    fn test_system_ports_are_filtered() {
        // Whatever the host has, only names matching the patterns come back
        let source = SerialPortSource::new(PortScan::System, &[r"^ttyUSB\d+$".to_string()]).unwrap();
        for device in source.enumerate() {
            assert!(Path::new(&device)
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("ttyUSB")));
        }
    }
}
