//! Version extraction from command-line tools.
//!
//! These functions run tools through a [`CommandRunner`] and pull version
//! strings out of their banners.

use reprokit_core::ports::{CommandRunner, SystemProbeError, SystemProbeResult};

/// First line of `<cmd> <version_flag>`.
///
/// Falls back to stderr when stdout is empty (some tools print there).
pub fn get_command_version(
    runner: &dyn CommandRunner,
    cmd: &str,
    version_flag: &str,
) -> SystemProbeResult<String> {
    let output = runner.run(cmd, &[version_flag])?;

    if !output.success {
        let detail = output.first_line().unwrap_or("no output");
        return Err(SystemProbeError::CommandFailed(format!(
            "{cmd} {version_flag}: {detail}"
        )));
    }

    output
        .first_line()
        .map(str::to_string)
        .ok_or_else(|| SystemProbeError::VersionParseFailed {
            command: cmd.to_string(),
            reason: "empty output".to_string(),
        })
}

/// Banner line of a C compiler, e.g. `gcc (Ubuntu 13.2.0-4ubuntu3) 13.2.0`.
pub fn get_compiler_banner(runner: &dyn CommandRunner, compiler: &str) -> SystemProbeResult<String> {
    get_command_version(runner, compiler, "--version")
}

/// Get python3 version.
/// Tries `python3` first, then `python` (checking it's Python 3).
pub fn get_python3_version(runner: &dyn CommandRunner) -> Option<String> {
    ["python3", "python"].into_iter().find_map(|cmd| {
        // "Python 3.12.1" -> "3.12.1"
        let banner = get_command_version(runner, cmd, "--version").ok()?;
        let version = banner.split_whitespace().nth(1)?;
        version.starts_with('3').then(|| version.to_string())
    })
}

/// Parse a version string into (major, minor) tuple.
pub fn parse_version_tuple(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}
