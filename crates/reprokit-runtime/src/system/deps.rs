//! Library-specific checks.
//!
//! cuDNN ships no binary that reports its version, so it is read from the
//! `CUDNN_MAJOR`/`CUDNN_MINOR`/`CUDNN_PATCHLEVEL` defines of its header and
//! reported in the packed integer form of `CUDNN_VERSION` (8.9.2 is `8902`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Header names to look for, newest layout first (cuDNN 8+ moved the
/// version defines into `cudnn_version.h`).
const CUDNN_HEADERS: [&str; 2] = ["cudnn_version.h", "cudnn.h"];

/// Include directories searched for the cuDNN headers.
///
/// `CUDA_HOME` and `CUDA_PATH` take precedence over the standard locations.
pub fn default_cudnn_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = ["CUDA_HOME", "CUDA_PATH"]
        .into_iter()
        .filter_map(|var| env::var_os(var))
        .map(|root| PathBuf::from(root).join("include"))
        .collect();

    dirs.extend(
        [
            "/usr/local/cuda/include",
            "/usr/include",
            "/usr/include/x86_64-linux-gnu",
            "/usr/include/aarch64-linux-gnu",
        ]
        .into_iter()
        .map(PathBuf::from),
    );
    dirs
}

/// Check if cuDNN is installed and return its packed version, e.g. `8902`.
pub fn check_cudnn(dirs: &[PathBuf]) -> Option<u32> {
    dirs.iter()
        .flat_map(|dir| CUDNN_HEADERS.iter().map(move |h| dir.join(h)))
        .find_map(|path| read_cudnn_header(&path))
}

fn read_cudnn_header(path: &Path) -> Option<u32> {
    let content = fs::read_to_string(path).ok()?;
    parse_cudnn_header(&content)
}

/// Parse the version defines out of a cuDNN header.
pub fn parse_cudnn_header(content: &str) -> Option<u32> {
    let define = |name: &str| -> Option<u32> {
        content.lines().find_map(|line| {
            let mut parts = line.split_whitespace();
            if parts.next()? != "#define" || parts.next()? != name {
                return None;
            }
            parts.next()?.parse().ok()
        })
    };

    let major = define("CUDNN_MAJOR")?;
    let minor = define("CUDNN_MINOR")?;
    let patch = define("CUDNN_PATCHLEVEL").unwrap_or(0);
    Some(cudnn_version_number(major, minor, patch))
}

/// Pack a cuDNN version the way its `CUDNN_VERSION` macro does.
///
/// cuDNN 9 widened the major field: 8.9.2 is `8902`, 9.1.0 is `90100`.
pub const fn cudnn_version_number(major: u32, minor: u32, patch: u32) -> u32 {
    let major_scale = if major >= 9 { 10_000 } else { 1_000 };
    major * major_scale + minor * 100 + patch
}
