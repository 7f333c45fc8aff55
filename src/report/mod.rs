//! Reporting utilities: text readouts for the CLI.

pub mod format;

pub use format::*;
