//! Shared test fixtures for runtime integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use reprokit_core::ports::{CommandOutput, CommandRunner, SystemProbeError, SystemProbeResult};

/// Command runner answering from a script keyed by `program args...`.
///
/// Programs without an entry behave as if they were not installed.
#[derive(Default)]
pub struct ScriptedRunner {
    script: HashMap<String, SystemProbeResult<CommandOutput>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, command_line: &str, result: SystemProbeResult<CommandOutput>) -> Self {
        self.script.insert(command_line.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> SystemProbeResult<CommandOutput> {
        let key = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(key.clone());

        self.script
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(SystemProbeError::CommandNotFound(program.to_string())))
    }
}

/// The device query issued by the GPU probe.
pub const SMI_QUERY: &str = "nvidia-smi --query-gpu=index,name,memory.total,compute_cap,driver_version --format=csv,noheader,nounits";
