//! Main CLI parser and top-level argument handling.
//!
//! Every flag is optional: a bare `reprokit-env` prints the default report.

use clap::Parser;
use reprokit_core::{CompilerPolicy, DEFAULT_COMPILER, ReportConfig};

/// Report host capabilities for ML paper reproduction.
///
/// Prints a JSON report between `---BEGIN_ENV_REPORT---` and
/// `---END_ENV_REPORT---` on stdout; diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "reprokit-env")]
#[command(about = "Report OS, GPU and toolchain capabilities as JSON")]
#[command(version)]
pub struct Cli {
    /// C compiler whose version banner is reported
    #[arg(long, env = "REPROKIT_COMPILER", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Fail instead of reporting an empty banner when the compiler check fails
    #[arg(long, env = "REPROKIT_STRICT_COMPILER")]
    pub strict_compiler: bool,

    /// Enable verbose/debug output on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Report configuration selected by the arguments.
    pub fn report_config(&self) -> ReportConfig {
        let policy = if self.strict_compiler {
            CompilerPolicy::Strict
        } else {
            CompilerPolicy::Lenient
        };
        ReportConfig::default()
            .with_compiler(self.compiler.clone())
            .with_compiler_policy(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_gives_default_config() {
        let cli = Cli::parse_from(["reprokit-env"]);
        assert!(!cli.verbose);
        // Env vars could override; only assert when they are unset
        if std::env::var_os("REPROKIT_COMPILER").is_none()
            && std::env::var_os("REPROKIT_STRICT_COMPILER").is_none()
        {
            assert_eq!(cli.report_config(), ReportConfig::default());
        }
    }

    #[test]
    fn test_compiler_flags() {
        let cli = Cli::parse_from(["reprokit-env", "--compiler", "clang", "--strict-compiler", "-v"]);
        let config = cli.report_config();
        assert_eq!(config.compiler, "clang");
        assert_eq!(config.compiler_policy, CompilerPolicy::Strict);
        assert!(cli.verbose);
    }
}
