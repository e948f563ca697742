//! Command-line front end for the environment reporter.

#![deny(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use error::CliError;
pub use parser::Cli;
