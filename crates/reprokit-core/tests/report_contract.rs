//! Output contract tests for the environment report.
//!
//! External agents cut the JSON out of stdout by the sentinel lines, so these
//! tests always go through `render` + `extract_report`.

use reprokit_core::{
    AcceleratorDetails, AcceleratorInfo, DeviceInfo, EnvProbePort, EnvReportService,
    ReportConfig, SystemProbeError, SystemProbeResult, extract_report,
};
use serde_json::Value;

struct StaticProbe {
    gpu: AcceleratorInfo,
}

impl EnvProbePort for StaticProbe {
    fn python_version(&self) -> Option<String> {
        Some("3.10.14".to_string())
    }

    fn os_descriptor(&self) -> String {
        "Linux-6.5.0-x86_64".to_string()
    }

    fn accelerator_info(&self) -> AcceleratorInfo {
        self.gpu.clone()
    }

    fn compiler_banner(&self, compiler: &str) -> SystemProbeResult<String> {
        if compiler == "gcc" {
            Ok("gcc (Ubuntu 11.4.0-1ubuntu1~22.04) 11.4.0".to_string())
        } else {
            Err(SystemProbeError::CommandNotFound(compiler.to_string()))
        }
    }
}

fn render(probe: &StaticProbe) -> Value {
    let output = EnvReportService::new(probe, ReportConfig::default())
        .render()
        .unwrap();
    serde_json::from_str(extract_report(&output).unwrap()).unwrap()
}

#[test]
fn test_missing_runtime_still_yields_valid_json() {
    let probe = StaticProbe {
        gpu: AcceleratorInfo::not_installed("NVIDIA driver"),
    };

    let report = render(&probe);
    assert_eq!(
        report["gpu_info"],
        serde_json::json!({"available": false, "reason": "NVIDIA driver not installed"})
    );
    assert_eq!(report["python_version"], "3.10.14");
}

#[test]
fn test_devices_match_device_count() {
    let devices = vec![
        DeviceInfo::new("NVIDIA A100-SXM4-40GB", 40_960 * 1024 * 1024, 8, 0),
        DeviceInfo::new("NVIDIA A100-SXM4-40GB", 40_960 * 1024 * 1024, 8, 0),
        DeviceInfo::new("NVIDIA GeForce RTX 3060", 12_288 * 1024 * 1024, 8, 6),
    ];
    let probe = StaticProbe {
        gpu: AcceleratorInfo::Available(AcceleratorDetails {
            cuda_version: Some("12.1".to_string()),
            cudnn_version: Some(8902),
            driver_version: "530.30.02".to_string(),
            devices,
        }),
    };

    let report = render(&probe);
    let gpu = &report["gpu_info"];
    let listed = gpu["devices"].as_array().unwrap();
    assert_eq!(gpu["device_count"].as_u64(), Some(3));
    assert_eq!(gpu["cudnn_version"].as_u64(), Some(8902));
    assert_eq!(listed.len(), 3);

    for device in listed {
        let vram = device["vram_gb"].as_f64().unwrap();
        assert!(((vram * 100.0).round() - vram * 100.0).abs() < 1e-6);

        let capability = device["capability"].as_str().unwrap();
        let (major, minor) = capability.split_once('.').unwrap();
        assert!(!major.is_empty() && major.chars().all(|c| c.is_ascii_digit()));
        assert!(!minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_repeated_reports_differ_only_in_timestamp() {
    let probe = StaticProbe {
        gpu: AcceleratorInfo::not_available("CUDA"),
    };

    let mut first = render(&probe);
    let mut second = render(&probe);
    first.as_object_mut().unwrap().remove("timestamp");
    second.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(first, second);
}
