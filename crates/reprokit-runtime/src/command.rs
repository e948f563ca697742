//! Process-backed command runner.

use std::io::ErrorKind;
use std::process::Command;

use reprokit_core::ports::{CommandOutput, CommandRunner, SystemProbeError, SystemProbeResult};
use tracing::debug;

/// Runs commands with `std::process::Command`, blocking until they exit.
///
/// No timeout is applied; a hung tool hangs the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> SystemProbeResult<CommandOutput> {
        debug!(program, ?args, "Running probe command");

        let output = Command::new(program).args(args).output().map_err(|err| {
            match err.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    SystemProbeError::CommandNotFound(program.to_string())
                }
                _ => SystemProbeError::CommandFailed(format!("{program}: {err}")),
            }
        })?;

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            debug!(program, status = ?output.status.code(), "Probe command exited non-zero");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let err = SystemCommandRunner
            .run("definitely_not_a_real_command_12345", &["--version"])
            .unwrap_err();
        assert_eq!(
            err,
            SystemProbeError::CommandNotFound("definitely_not_a_real_command_12345".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_status() {
        let out = SystemCommandRunner.run("sh", &["-c", "echo hello; exit 3"]).unwrap();
        assert!(!out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }
}
