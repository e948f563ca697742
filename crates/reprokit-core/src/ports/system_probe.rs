//! System probe port for environment reporting.
//!
//! This port abstracts active system probing (command execution, hardware
//! detection) from the report assembly. Implementations live in adapters
//! (e.g., reprokit-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (active probing via `Command::new`)
//! - CLI injects the probe via main.rs

use crate::domain::AcceleratorInfo;
use thiserror::Error;

/// Errors that can occur during system probing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemProbeError {
    /// The program could not be spawned (not on PATH, not executable).
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// The program ran but failed or could not be waited on.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse version output.
    #[error("Version parse failed for {command}: {reason}")]
    VersionParseFailed { command: String, reason: String },

    /// GPU detection failed.
    #[error("GPU detection failed: {0}")]
    GpuDetectionFailed(String),
}

/// Result type for system probe operations.
pub type SystemProbeResult<T> = Result<T, SystemProbeError>;

/// Port for probing the host environment.
///
/// The core report builder uses this trait so it stays pure and testable.
///
/// # Example
///
/// ```ignore
/// use reprokit_core::ports::EnvProbePort;
///
/// fn describe(probe: &dyn EnvProbePort) {
///     let gpu = probe.accelerator_info();
///     let gcc = probe.compiler_banner("gcc");
///     // ...
/// }
/// ```
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait EnvProbePort: Send + Sync {
    /// Version of the Python 3 interpreter on PATH, if any.
    fn python_version(&self) -> Option<String>;

    /// Platform descriptor such as `Linux-6.8.0-x86_64`.
    fn os_descriptor(&self) -> String;

    /// Detect accelerator hardware and acceleration libraries.
    ///
    /// Never fails: problems are reported inside the returned value.
    fn accelerator_info(&self) -> AcceleratorInfo;

    /// First line of `<compiler> --version`.
    fn compiler_banner(&self, compiler: &str) -> SystemProbeResult<String>;
}
