//! Core domain types and ports for reprokit.
//!
//! This crate is pure: it defines the capability report, the probe ports
//! adapters implement, and the service that assembles a report from a probe.
//! Active system probing lives in `reprokit-runtime`.

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    AcceleratorDetails, AcceleratorInfo, BEGIN_MARKER, CapabilityReport, DeviceInfo, END_MARKER,
    extract_report, frame_report,
};
pub use ports::{
    CommandOutput, CommandRunner, EnvProbePort, SystemProbeError, SystemProbeResult,
};
pub use services::{EnvReportService, ReportError};
pub use settings::{CompilerPolicy, DEFAULT_COMPILER, ReportConfig};
