//! Subcommand implementations

pub mod report;
pub mod sample;
pub mod validate;
