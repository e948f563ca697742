//! OS-level probing for reprokit.
//!
//! Implements the ports defined in `reprokit-core` by running external tools
//! (`nvidia-smi`, `nvcc`, compilers, Python) and reading system information.

pub mod command;
pub mod system;

pub use command::SystemCommandRunner;
pub use system::DefaultEnvProbe;
