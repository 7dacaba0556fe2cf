//! Test utilities
//!
//! Scripted stand-ins for the flashing collaborators, plus proptest
//! generators.

#[cfg(test)]
pub mod fakes {
    use std::collections::{HashSet, VecDeque};
    use std::io;
    use std::sync::Mutex;

    use crate::core::flash::{DeviceSource, Operator, Uploader};
    use crate::error::UploadFailure;

    /// Device source returning a fixed list
    pub struct FakeDevices {
        devices: Vec<String>,
    }

    impl FakeDevices {
        pub fn new(devices: Vec<String>) -> Self {
            Self { devices }
        }
    }

    impl DeviceSource for FakeDevices {
        fn enumerate(&self) -> Vec<String> {
            self.devices.clone()
        }
    }

    /// Uploader that records calls and fails for chosen devices
    pub struct FakeUploader {
        failing: HashSet<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeUploader {
        pub fn succeeding() -> Self {
            Self::failing_on(&[])
        }

        pub fn failing_on(devices: &[&str]) -> Self {
            Self {
                failing: devices.iter().map(ToString::to_string).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// `(device, environment)` pairs in call order
        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Uploader for FakeUploader {
        async fn upload(&self, device: &str, environment: &str) -> Result<(), UploadFailure> {
            self.calls
                .lock()
                .unwrap()
                .push((device.to_string(), environment.to_string()));

            if self.failing.contains(device) {
                Err(UploadFailure::ExitStatus {
                    tool: "fake".to_string(),
                    status: "exit status: 1".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    /// Operator answering prompts from a script
    ///
    /// Runs out of answers as blank lines, like EOF on a terminal.
    #[derive(Default)]
    pub struct ScriptedOperator {
        answers: VecDeque<String>,
        shown: Vec<String>,
        prompts: Vec<String>,
        acknowledgments: usize,
        quiet: bool,
        fail_acknowledgments: bool,
    }

    impl ScriptedOperator {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        /// Drop progress lines the way `--quiet` does
        pub fn quiet(answers: &[&str]) -> Self {
            Self {
                quiet: true,
                ..Self::new(answers)
            }
        }

        /// Fail every acknowledgment with a broken pipe
        pub fn failing_acknowledgments(self) -> Self {
            Self {
                fail_acknowledgments: true,
                ..self
            }
        }

        pub fn shown(&self) -> &[String] {
            &self.shown
        }

        pub fn prompts(&self) -> &[String] {
            &self.prompts
        }

        pub fn acknowledgments(&self) -> usize {
            self.acknowledgments
        }
    }

    impl Operator for ScriptedOperator {
        fn show(&mut self, line: &str) {
            if !self.quiet {
                self.shown.push(line.to_string());
            }
        }

        fn present(&mut self, line: &str) {
            self.shown.push(line.to_string());
        }

        fn ask(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.pop_front().unwrap_or_default())
        }

        fn acknowledge(&mut self, _prompt: &str) -> io::Result<()> {
            if self.fail_acknowledgments {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"));
            }
            self.acknowledgments += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a USB serial device path
    pub fn device_path() -> impl Strategy<Value = String> {
        (prop_oneof![Just("ttyUSB"), Just("ttyACM")], 0u8..16)
            .prop_map(|(prefix, n)| format!("/dev/{prefix}{n}"))
    }

    /// Generate an enumeration result (may be empty, may repeat)
    pub fn device_list() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(device_path(), 0..6)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_device_path_generator(path in device_path()) {
            prop_assert!(path.starts_with("/dev/tty"));
        }
    }
}
