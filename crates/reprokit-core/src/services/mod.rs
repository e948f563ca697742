//! Services built on top of the ports.

mod env_report;

pub use env_report::{
    EnvReportService, PYTHON_NOT_FOUND, ReportError, WINDOWS_COMPILER_PLACEHOLDER,
};
