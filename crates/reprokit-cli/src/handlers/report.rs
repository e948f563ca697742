//! Environment report handler.

use std::io::Write;

use reprokit_core::ports::EnvProbePort;
use reprokit_core::{EnvReportService, ReportConfig};
use tracing::debug;

use crate::error::CliError;

/// Build the report and write it, framed, to `out`.
///
/// Nothing is written unless the whole report was built.
pub fn execute(
    probe: &dyn EnvProbePort,
    config: ReportConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    debug!(compiler = %config.compiler, policy = %config.compiler_policy, "Building environment report");

    let framed = EnvReportService::new(probe, config).render()?;
    out.write_all(framed.as_bytes())?;
    out.flush()?;
    Ok(())
}
