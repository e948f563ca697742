//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod command_runner;
pub mod system_probe;

pub use command_runner::{CommandOutput, CommandRunner};
#[cfg(any(test, feature = "test-utils"))]
pub use system_probe::MockEnvProbePort;
pub use system_probe::{EnvProbePort, SystemProbeError, SystemProbeResult};
