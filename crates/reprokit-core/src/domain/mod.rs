//! Domain types for the environment report.

mod accelerator;
mod report;

pub use accelerator::{AcceleratorDetails, AcceleratorInfo, DeviceInfo, bytes_to_gib};
pub use report::{
    BEGIN_MARKER, CapabilityReport, END_MARKER, TIMESTAMP_FORMAT, extract_report, frame_report,
};
