//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `ReportError` to exit codes and user-facing messages.

use reprokit_core::ReportError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Compiler check failed under the strict policy.
    #[error("Process error: {0}")]
    Process(String),

    /// Report could not be rendered.
    #[error("{0}")]
    Report(String),

    /// Writing to stdout failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Process(_) => 71, // EX_OSERR
            Self::Report(_) => 70,  // EX_SOFTWARE
            Self::Io(_) => 74,      // EX_IOERR
        }
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Compiler(probe_err) => Self::Process(probe_err.to_string()),
            ReportError::Serialize(json_err) => Self::Report(json_err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reprokit_core::SystemProbeError;

    #[test]
    fn test_compiler_error_maps_to_oserr() {
        let err = CliError::from(ReportError::Compiler(SystemProbeError::CommandNotFound(
            "gcc".to_string(),
        )));
        assert_eq!(err.exit_code(), 71);
        assert_eq!(err.to_string(), "Process error: Command not found: gcc");
    }
}
