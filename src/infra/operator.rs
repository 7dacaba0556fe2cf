//! Terminal operator
//!
//! Line-oriented prompts on stdin and progress on stdout (or stderr when
//! stdout is reserved for JSON).

use std::io::{self, BufRead, Write};

use crate::core::flash::Operator;

/// Where progress lines and prompts are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdout,
    Stderr,
}

/// Operator on the controlling terminal
#[derive(Debug, Clone)]
pub struct TerminalOperator {
    channel: Channel,
    quiet: bool,
}

impl TerminalOperator {
    /// Create a terminal operator
    ///
    /// In quiet mode progress lines are dropped. Prompts and the lines
    /// presented with them are always shown.
    pub fn new(channel: Channel, quiet: bool) -> Self {
        Self { channel, quiet }
    }

    fn write(&self, text: &str) -> io::Result<()> {
        match self.channel {
            Channel::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Channel::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }

    fn read_line() -> io::Result<String> {
        read_answer(&mut io::stdin().lock())
    }

    fn write_line(&self, line: &str) {
        if let Err(e) = self.write(&format!("{line}\n")) {
            tracing::debug!("Failed to write progress line: {}", e);
        }
    }
}

/// Read one answer line without its line ending
///
/// EOF gives an empty answer. Bytes that aren't valid UTF-8 are replaced
/// rather than rejected, so they read as an answer that matches nothing.
fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut buf = Vec::new();
    input.read_until(b'\n', &mut buf)?;
    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl Operator for TerminalOperator {
    fn show(&mut self, line: &str) {
        if !self.quiet {
            self.write_line(line);
        }
    }

    fn present(&mut self, line: &str) {
        self.write_line(line);
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.write(&format!("\n{prompt}"))?;
        Self::read_line()
    }

    fn acknowledge(&mut self, prompt: &str) -> io::Result<()> {
        self.write(&format!("\n{prompt}"))?;
        Self::read_line().map(|_| ())
    }
}
