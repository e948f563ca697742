//! Command handlers.

pub mod report;
