//! `growth-curves` library crate.
//!
//! The binary (`growth`) is a thin wrapper around this library so that:
//!
//! - the interpolation engine is testable without spawning processes
//! - the engine stays headless and reusable by any front end
//! - CLI, TUI and export code can share one view pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
