//! Capability report and its sentinel framing.

use serde::Serialize;

use super::AcceleratorInfo;

/// Marker line printed before the JSON body.
pub const BEGIN_MARKER: &str = "---BEGIN_ENV_REPORT---";

/// Marker line printed after the JSON body.
pub const END_MARKER: &str = "---END_ENV_REPORT---";

/// Timestamp format used in the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Snapshot of host capabilities relevant to reproducing ML papers.
///
/// Field names are part of the output contract with downstream parsers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityReport {
    pub timestamp: String,
    pub python_version: String,
    pub os: String,
    pub gpu_info: AcceleratorInfo,
    pub gcc_check: String,
}

/// Render a report as pretty JSON wrapped in sentinel lines.
///
/// The returned string ends with a newline after the end marker.
pub fn frame_report(report: &CapabilityReport) -> serde_json::Result<String> {
    let body = serde_json::to_string_pretty(report)?;
    Ok(format!("{BEGIN_MARKER}\n{body}\n{END_MARKER}\n"))
}

/// Extract the JSON body between the sentinel lines of a framed report.
///
/// Any text before the begin marker or after the end marker is ignored.
pub fn extract_report(output: &str) -> Option<&str> {
    let start = output.find(BEGIN_MARKER)? + BEGIN_MARKER.len();
    let end = start + output[start..].find(END_MARKER)?;
    Some(output[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CapabilityReport {
        CapabilityReport {
            timestamp: "2024-05-01 10:00:00".to_string(),
            python_version: "3.11.4".to_string(),
            os: "Linux-6.8.0-x86_64".to_string(),
            gpu_info: AcceleratorInfo::not_available("CUDA"),
            gcc_check: "gcc (Ubuntu 13.2.0-4ubuntu3) 13.2.0".to_string(),
        }
    }

    #[test]
    fn test_frame_uses_markers_and_two_space_indent() {
        let framed = frame_report(&sample()).unwrap();
        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines.first(), Some(&BEGIN_MARKER));
        assert_eq!(lines.last(), Some(&END_MARKER));
        assert_eq!(lines[1], "{");
        assert!(lines[2].starts_with("  \"timestamp\""));
    }

    #[test]
    fn test_extract_ignores_surrounding_noise() {
        let framed = frame_report(&sample()).unwrap();
        let noisy = format!("warning: something\n{framed}trailing\n");
        let body = extract_report(&noisy).unwrap();
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["python_version"], "3.11.4");
    }

    #[test]
    fn test_extract_missing_end_marker() {
        assert!(extract_report("---BEGIN_ENV_REPORT---\n{}").is_none());
        assert!(extract_report("no markers here").is_none());
    }
}
