//! Command runner port.
//!
//! Probes never call `std::process::Command` directly; they go through this
//! trait so their parsing can be exercised against scripted output.

use super::SystemProbeResult;

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stdout and stderr.
    pub fn failed(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout if it has content, otherwise stderr.
    ///
    /// Some tools print their version banner to stderr.
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    /// First non-blank line of [`Self::text`], trimmed.
    pub fn first_line(&self) -> Option<&str> {
        self.text()
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Runs external programs synchronously.
///
/// Implementations must return [`super::SystemProbeError::CommandNotFound`]
/// when the program cannot be spawned at all, and a [`CommandOutput`] (with
/// `success == false`) when it ran but exited non-zero.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> SystemProbeResult<CommandOutput>;
}
