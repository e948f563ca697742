//! Report configuration.

use std::fmt;

/// Compiler probed when none is configured.
pub const DEFAULT_COMPILER: &str = "gcc";

/// What to do when the compiler version check cannot run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompilerPolicy {
    /// Log a warning and report an empty banner.
    #[default]
    Lenient,
    /// Abort report generation with the probe error.
    Strict,
}

impl fmt::Display for CompilerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Settings for one environment report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Program invoked with `--version` for the compiler check.
    pub compiler: String,
    pub compiler_policy: CompilerPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            compiler_policy: CompilerPolicy::default(),
        }
    }
}

impl ReportConfig {
    /// Set the compiler program.
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Set the compiler failure policy.
    #[must_use]
    pub const fn with_compiler_policy(mut self, policy: CompilerPolicy) -> Self {
        self.compiler_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.compiler, "gcc");
        assert_eq!(config.compiler_policy, CompilerPolicy::Lenient);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(CompilerPolicy::Lenient.to_string(), "lenient");
        assert_eq!(CompilerPolicy::Strict.to_string(), "strict");
    }
}
