//! Target selection
//!
//! Resolves which devices a run will flash: an explicit port list, every
//! enumerated device, or a subset the operator picks by number.

use crate::config::defaults::CONFIRM_TOKEN;
use crate::error::FlashError;

/// How the set of devices to flash is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Ports given on the command line, used as-is
    Explicit(Vec<String>),
    /// Every enumerated device, in enumeration order
    All,
    /// Operator picks from the enumerated list
    Interactive,
}

/// Answer to the interactive `(A)ll / (S)elect / (Q)uit` menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    All,
    Select,
    Quit,
}

impl MenuChoice {
    /// Parse a menu answer, case-insensitively
    ///
    /// Anything other than `a` or `s` means quit.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Self::All,
            "S" => Self::Select,
            _ => Self::Quit,
        }
    }
}

/// Result of resolving a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Devices to flash, in order
    Targets(Vec<String>),
    /// Operator chose to quit from the menu
    Quit,
}

/// Pick devices from `devices` by 1-based index
///
/// Every whitespace-separated token must be an integer, otherwise the whole
/// input is rejected with [`FlashError::InvalidSelection`]. Integers that do
/// not name a device (zero, negative, past the end) are dropped. Order and
/// repeats follow the input.
pub fn pick_by_index(input: &str, devices: &[String]) -> Result<Vec<String>, FlashError> {
    let mut picked = Vec::new();

    for token in input.split_whitespace() {
        if !is_integer(token) {
            return Err(FlashError::InvalidSelection {
                input: input.trim().to_string(),
            });
        }

        // Integers too large for usize can't index anything either
        let Ok(index) = token.trim_start_matches('+').parse::<usize>() else {
            continue;
        };

        if let Some(device) = index.checked_sub(1).and_then(|i| devices.get(i)) {
            picked.push(device.clone());
        }
    }

    Ok(picked)
}

/// Whether an answer to the confirmation prompt means "go ahead"
///
/// Only the full word `yes` counts; `y`, blank and anything else cancel.
pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(CONFIRM_TOKEN)
}

fn is_integer(token: &str) -> bool {
    let digits = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
