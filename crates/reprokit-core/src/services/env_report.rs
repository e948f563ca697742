//! Environment report assembly.
//!
//! Pulls each field from an [`EnvProbePort`] and applies the configured
//! compiler policy. The only way this can fail is a strict compiler check.

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CapabilityReport, TIMESTAMP_FORMAT, frame_report};
use crate::ports::{EnvProbePort, SystemProbeError};
use crate::settings::{CompilerPolicy, ReportConfig};

/// Placeholder reported instead of running a compiler on Windows hosts.
pub const WINDOWS_COMPILER_PLACEHOLDER: &str = "Windows (Check Visual Studio)";

/// Reported when no Python 3 interpreter is found.
pub const PYTHON_NOT_FOUND: &str = "not found";

/// Errors from building or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Compiler check failed under [`CompilerPolicy::Strict`].
    #[error("Compiler check failed: {0}")]
    Compiler(#[from] SystemProbeError),

    /// JSON rendering failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Builds capability reports from a system probe.
pub struct EnvReportService<'a> {
    probe: &'a dyn EnvProbePort,
    config: ReportConfig,
}

impl<'a> EnvReportService<'a> {
    pub fn new(probe: &'a dyn EnvProbePort, config: ReportConfig) -> Self {
        Self { probe, config }
    }

    /// Build a report stamped with the current local time.
    pub fn build(&self) -> Result<CapabilityReport, ReportError> {
        self.build_at(Local::now())
    }

    /// Build a report stamped with `now`.
    pub fn build_at(&self, now: DateTime<Local>) -> Result<CapabilityReport, ReportError> {
        self.build_for_host(now, cfg!(target_os = "windows"))
    }

    /// Build a report and render it between the sentinel markers.
    pub fn render(&self) -> Result<String, ReportError> {
        let report = self.build()?;
        Ok(frame_report(&report)?)
    }

    fn build_for_host(
        &self,
        now: DateTime<Local>,
        is_windows: bool,
    ) -> Result<CapabilityReport, ReportError> {
        let python_version = self.probe.python_version().unwrap_or_else(|| {
            debug!("No Python 3 interpreter found on PATH");
            PYTHON_NOT_FOUND.to_string()
        });

        Ok(CapabilityReport {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            python_version,
            os: self.probe.os_descriptor(),
            gpu_info: self.probe.accelerator_info(),
            gcc_check: self.compiler_check(is_windows)?,
        })
    }

    fn compiler_check(&self, is_windows: bool) -> Result<String, ReportError> {
        if is_windows {
            return Ok(WINDOWS_COMPILER_PLACEHOLDER.to_string());
        }

        match self.probe.compiler_banner(&self.config.compiler) {
            Ok(banner) => Ok(banner),
            Err(err) => match self.config.compiler_policy {
                CompilerPolicy::Lenient => {
                    warn!(compiler = %self.config.compiler, "Compiler check failed: {err}");
                    Ok(String::new())
                }
                CompilerPolicy::Strict => Err(ReportError::Compiler(err)),
            },
        }
    }
}
