//! Operating system descriptor.

use std::env::consts;

use sysinfo::System;

/// Platform string such as `Linux-6.8.0-45-generic-x86_64`.
///
/// Uses the kernel version on Linux and the OS release elsewhere; the part is
/// dropped when it cannot be determined.
pub fn os_descriptor() -> String {
    let version = if cfg!(target_os = "linux") {
        System::kernel_version()
    } else {
        System::os_version()
    };
    format_descriptor(os_label(consts::OS), version.as_deref(), consts::ARCH)
}

fn os_label(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

fn format_descriptor(label: &str, version: Option<&str>, arch: &str) -> String {
    match version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(version) => format!("{label}-{version}-{arch}"),
        None => format!("{label}-{arch}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_descriptor() {
        assert_eq!(
            format_descriptor("Linux", Some("6.8.0-45-generic"), "x86_64"),
            "Linux-6.8.0-45-generic-x86_64"
        );
        assert_eq!(format_descriptor("macOS", Some("  "), "aarch64"), "macOS-aarch64");
        assert_eq!(format_descriptor("Windows", None, "x86_64"), "Windows-x86_64");
    }

    #[test]
    fn test_os_descriptor_mentions_arch() {
        assert!(os_descriptor().ends_with(consts::ARCH));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_os_descriptor_linux_label() {
        assert!(os_descriptor().starts_with("Linux-"));
    }
}
