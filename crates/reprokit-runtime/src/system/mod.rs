//! System probe implementation for reprokit-runtime.
//!
//! This module provides the `DefaultEnvProbe` which implements
//! `EnvProbePort` from reprokit-core. It performs active system probing
//! via command execution and hardware detection.

mod commands;
mod deps;
mod gpu;
mod platform;

use std::path::PathBuf;

use reprokit_core::domain::AcceleratorInfo;
use reprokit_core::ports::{CommandRunner, EnvProbePort, SystemProbeResult};

use crate::command::SystemCommandRunner;

pub use commands::{get_command_version, get_compiler_banner, get_python3_version};
pub use deps::{check_cudnn, cudnn_version_number, default_cudnn_dirs, parse_cudnn_header};
pub use gpu::{
    ACCELERATOR, DRIVER_RUNTIME, SmiDevice, check_cuda, detect_accelerator_info,
    enumerate_devices, parse_device_row,
};
pub use platform::os_descriptor;

/// Default implementation of `EnvProbePort`.
///
/// Generic over the command runner so probing logic can be driven by
/// scripted output in tests. It should be constructed in the CLI's main.rs
/// and passed to the report service.
///
/// # Example
///
/// ```ignore
/// use reprokit_runtime::DefaultEnvProbe;
/// use reprokit_core::ports::EnvProbePort;
///
/// let probe = DefaultEnvProbe::new();
/// let gpu = probe.accelerator_info();
/// ```
pub struct DefaultEnvProbe<R = SystemCommandRunner> {
    runner: R,
    cudnn_dirs: Vec<PathBuf>,
}

impl DefaultEnvProbe {
    /// Create a probe that runs real commands.
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl Default for DefaultEnvProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> DefaultEnvProbe<R> {
    /// Create a probe that runs commands through `runner`.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            cudnn_dirs: default_cudnn_dirs(),
        }
    }

    /// Override the directories searched for cuDNN headers.
    #[must_use]
    pub fn with_cudnn_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.cudnn_dirs = dirs;
        self
    }

    /// The command runner used for probing.
    pub const fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> EnvProbePort for DefaultEnvProbe<R> {
    fn python_version(&self) -> Option<String> {
        get_python3_version(&self.runner)
    }

    fn os_descriptor(&self) -> String {
        os_descriptor()
    }

    fn accelerator_info(&self) -> AcceleratorInfo {
        detect_accelerator_info(&self.runner, &self.cudnn_dirs)
    }

    fn compiler_banner(&self, compiler: &str) -> SystemProbeResult<String> {
        get_compiler_banner(&self.runner, compiler)
    }
}
