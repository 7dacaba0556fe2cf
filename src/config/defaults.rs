//! Default configuration values

/// Upload tool invoked once per device
pub const DEFAULT_UPLOAD_TOOL: &str = "platformio";

/// PlatformIO environment used when none is given
pub const DEFAULT_ENVIRONMENT: &str = "nodemcuv2";

/// Device name patterns for USB serial adapters (Linux)
#[cfg(target_os = "linux")]
pub const DEFAULT_DEVICE_PATTERNS: &[&str] = &[r"^ttyUSB\d+$", r"^ttyACM\d+$"];

/// Device name patterns for USB serial adapters (macOS)
#[cfg(target_os = "macos")]
pub const DEFAULT_DEVICE_PATTERNS: &[&str] = &[
    r"^cu\.usbserial.*$",
    r"^cu\.SLAB_USBtoUART.*$",
    r"^cu\.wchusbserial.*$",
    r"^cu\.usbmodem.*$",
];

/// Device name patterns for USB serial adapters (Windows)
#[cfg(windows)]
pub const DEFAULT_DEVICE_PATTERNS: &[&str] = &[r"^COM\d+$"];

/// Device name patterns for USB serial adapters (other platforms)
#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub const DEFAULT_DEVICE_PATTERNS: &[&str] = &[r"^ttyU\d+$", r"^cuaU\d+$", r"^ttyUSB\d+$"];

/// Only this token (case-insensitive) confirms a run
pub const CONFIRM_TOKEN: &str = "yes";
