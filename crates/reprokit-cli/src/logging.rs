//! Diagnostic logging for the CLI.
//!
//! Diagnostics always go to stderr so stdout carries only the framed report.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Default level when `RUST_LOG` is unset.
pub const fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
