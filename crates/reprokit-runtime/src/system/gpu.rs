//! NVIDIA accelerator detection.
//!
//! Devices are enumerated with a single `nvidia-smi --query-gpu` call; the
//! CUDA runtime version comes from `nvcc` (or the `nvidia-smi` banner) and the
//! cuDNN version from its installed header.

use std::path::PathBuf;

use reprokit_core::domain::{AcceleratorDetails, AcceleratorInfo, DeviceInfo};
use reprokit_core::ports::{CommandOutput, CommandRunner, SystemProbeError, SystemProbeResult};
use tracing::{debug, warn};

use super::commands::parse_version_tuple;
use super::deps::check_cudnn;

/// Name used when the driver tooling is missing entirely.
pub const DRIVER_RUNTIME: &str = "NVIDIA driver";

/// Name used when the tooling runs but no device is usable.
pub const ACCELERATOR: &str = "CUDA";

const SMI: &str = "nvidia-smi";
const QUERY_GPU: &str = "--query-gpu=index,name,memory.total,compute_cap,driver_version";
const QUERY_FORMAT: &str = "--format=csv,noheader,nounits";

/// Messages `nvidia-smi` prints when the driver is installed but no GPU is usable.
const NO_DEVICE_MARKERS: [&str; 2] = [
    "No devices were found",
    "couldn't communicate with the NVIDIA driver",
];

/// One row of `nvidia-smi --query-gpu` output.
#[derive(Debug, Clone, PartialEq)]
pub struct SmiDevice {
    pub index: u32,
    pub info: DeviceInfo,
    pub driver_version: String,
}

/// Detect NVIDIA accelerators.
///
/// Never fails: every problem is folded into the returned [`AcceleratorInfo`].
pub fn detect_accelerator_info(
    runner: &dyn CommandRunner,
    cudnn_dirs: &[PathBuf],
) -> AcceleratorInfo {
    let output = match runner.run(SMI, &[QUERY_GPU, QUERY_FORMAT]) {
        Ok(output) => output,
        Err(SystemProbeError::CommandNotFound(_)) => {
            debug!("{SMI} not found, assuming no NVIDIA driver");
            return AcceleratorInfo::not_installed(DRIVER_RUNTIME);
        }
        Err(err) => {
            warn!("GPU query failed: {err}");
            return AcceleratorInfo::failed(err);
        }
    };

    let devices = match enumerate_devices(&output) {
        Ok(Some(devices)) => devices,
        Ok(None) => return AcceleratorInfo::not_available(ACCELERATOR),
        Err(err) => {
            warn!("GPU query failed: {err}");
            return AcceleratorInfo::failed(err);
        }
    };

    let driver_version = devices
        .first()
        .map(|d| d.driver_version.clone())
        .unwrap_or_default();

    AcceleratorInfo::Available(AcceleratorDetails {
        cuda_version: check_cuda(runner),
        cudnn_version: check_cudnn(cudnn_dirs),
        driver_version,
        devices: devices.into_iter().map(|d| d.info).collect(),
    })
}

/// Parse the device query output.
///
/// Returns `Ok(None)` when the driver answered but lists no usable device.
pub fn enumerate_devices(output: &CommandOutput) -> SystemProbeResult<Option<Vec<SmiDevice>>> {
    if !output.success {
        let text = format!("{}\n{}", output.stdout, output.stderr);
        if NO_DEVICE_MARKERS.iter().any(|marker| text.contains(marker)) {
            return Ok(None);
        }
        let detail = output.first_line().unwrap_or("no output");
        return Err(SystemProbeError::GpuDetectionFailed(format!(
            "{SMI} exited with an error: {detail}"
        )));
    }

    let mut devices = output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_device_row)
        .collect::<SystemProbeResult<Vec<_>>>()?;

    if devices.is_empty() {
        return Ok(None);
    }

    devices.sort_by_key(|d| d.index);
    Ok(Some(devices))
}

/// Parse one CSV row: `index, name, memory MiB, compute cap, driver`.
///
/// The name is everything between the index and the last three columns, so
/// names containing commas survive.
pub fn parse_device_row(row: &str) -> SystemProbeResult<SmiDevice> {
    let malformed = |reason: String| {
        SystemProbeError::GpuDetectionFailed(format!("unexpected {SMI} row '{row}': {reason}"))
    };

    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(malformed(format!("expected 5 columns, found {}", fields.len())));
    }

    let tail = fields.len() - 3;
    let index: u32 = fields[0]
        .parse()
        .map_err(|_| malformed(format!("bad index '{}'", fields[0])))?;
    let name = fields[1..tail].join(", ");
    let memory_mib: u64 = fields[tail]
        .parse()
        .map_err(|_| malformed(format!("bad memory.total '{}'", fields[tail])))?;
    // nvidia-smi reports memory in MiB
    let memory_bytes = memory_mib
        .checked_mul(1024 * 1024)
        .ok_or_else(|| malformed(format!("memory.total '{memory_mib}' MiB out of range")))?;
    let (major, minor) = parse_version_tuple(fields[tail + 1])
        .ok_or_else(|| malformed(format!("bad compute_cap '{}'", fields[tail + 1])))?;

    Ok(SmiDevice {
        index,
        info: DeviceInfo::new(name, memory_bytes, major, minor),
        driver_version: fields[tail + 2].to_string(),
    })
}

/// CUDA runtime version, from `nvcc` first and the driver banner second.
pub fn check_cuda(runner: &dyn CommandRunner) -> Option<String> {
    if let Ok(output) = runner.run("nvcc", &["--version"])
        && output.success
        && let Some(version) = parse_nvcc_release(&output.stdout)
    {
        return Some(version);
    }

    let output = runner.run(SMI, &[]).ok()?;
    if !output.success {
        return None;
    }
    parse_smi_cuda_version(&output.stdout)
}

/// Extract version from "Cuda compilation tools, release 12.0, V12.0.140".
pub fn parse_nvcc_release(text: &str) -> Option<String> {
    let line = text.lines().find(|l| l.contains("release"))?;
    let version = line.split("release").nth(1)?;
    let version = version.trim().split(',').next()?.trim();
    (!version.is_empty()).then(|| version.to_string())
}

/// Extract version from the "CUDA Version: 12.2" field of the `nvidia-smi` banner.
pub fn parse_smi_cuda_version(text: &str) -> Option<String> {
    let rest = text.split("CUDA Version:").nth(1)?;
    let version = rest.split_whitespace().next()?.trim_end_matches('|');
    (!version.is_empty()).then(|| version.to_string())
}
