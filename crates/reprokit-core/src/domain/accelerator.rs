//! Accelerator (GPU) capability types.
//!
//! The JSON shape of [`AcceleratorInfo`] is consumed by external agents that
//! parse the environment report, so serialization is written by hand to keep
//! the `available` flag and field names fixed.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A single visible accelerator device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    /// Marketing name reported by the driver (e.g. "NVIDIA GeForce RTX 4090").
    pub name: String,
    /// Total device memory in GiB, rounded to 2 decimals.
    pub vram_gb: f64,
    /// Compute capability formatted as `"<major>.<minor>"`.
    pub capability: String,
}

impl DeviceInfo {
    /// Build device info from raw driver values.
    pub fn new(name: impl Into<String>, total_memory_bytes: u64, major: u32, minor: u32) -> Self {
        Self {
            name: name.into(),
            vram_gb: bytes_to_gib(total_memory_bytes),
            capability: format!("{major}.{minor}"),
        }
    }
}

/// Convert bytes to GiB rounded to 2 decimal places.
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_gib(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GIB * 100.0).round() / 100.0
}

/// Details reported when at least one accelerator is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratorDetails {
    /// CUDA runtime version (e.g. "12.2"), if it could be determined.
    pub cuda_version: Option<String>,
    /// cuDNN version in packed integer form (8.9.2 is `8902`), if it could
    /// be determined.
    pub cudnn_version: Option<u32>,
    /// NVIDIA driver version.
    pub driver_version: String,
    /// Devices in driver index order.
    pub devices: Vec<DeviceInfo>,
}

impl AcceleratorDetails {
    /// Number of visible devices. Always equal to `devices.len()`.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// Accelerator probe result.
///
/// The probe never fails outright: missing tooling, absent devices and
/// unexpected query errors are all folded into this value.
#[derive(Debug, Clone, PartialEq)]
pub enum AcceleratorInfo {
    /// Devices are present and were enumerated.
    Available(AcceleratorDetails),
    /// Tooling missing or no device visible.
    Unavailable { reason: String },
    /// Probing failed unexpectedly.
    Failed { error: String },
}

impl AcceleratorInfo {
    /// The accelerator runtime tooling itself is not installed.
    pub fn not_installed(runtime: &str) -> Self {
        Self::Unavailable {
            reason: format!("{runtime} not installed"),
        }
    }

    /// The runtime is installed but reports no usable accelerator.
    pub fn not_available(accelerator: &str) -> Self {
        Self::Unavailable {
            reason: format!("{accelerator} not available"),
        }
    }

    /// Wrap an unexpected probing failure.
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl Serialize for AcceleratorInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Available(details) => {
                map.serialize_entry("available", &true)?;
                map.serialize_entry("cuda_version", &details.cuda_version)?;
                map.serialize_entry("cudnn_version", &details.cudnn_version)?;
                map.serialize_entry("driver_version", &details.driver_version)?;
                map.serialize_entry("device_count", &details.device_count())?;
                map.serialize_entry("devices", &details.devices)?;
            }
            Self::Unavailable { reason } => {
                map.serialize_entry("available", &false)?;
                map.serialize_entry("reason", reason)?;
            }
            Self::Failed { error } => {
                map.serialize_entry("available", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}
