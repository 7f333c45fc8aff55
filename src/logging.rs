//! `tracing` subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for readouts and tables. `RUST_LOG`
//! always wins over the level derived from `-v` flags.

use std::io;

use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "debug");
    }
}
