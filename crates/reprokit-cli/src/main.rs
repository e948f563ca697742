//! CLI entry point - the composition root.
//!
//! The only place where the system probe is wired to the report service.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use reprokit_cli::{Cli, handlers, logging};
use reprokit_runtime::DefaultEnvProbe;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let probe = DefaultEnvProbe::new();
    let mut stdout = io::stdout().lock();

    match handlers::report::execute(&probe, cli.report_config(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
