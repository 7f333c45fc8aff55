//! Error types.
//!
//! `AppError` is what the binary reports: a message plus a process exit code.
//! `EngineError` is the typed data-integrity error raised by the engine when a
//! phase violates the catalog invariants.
//!
//! Exit codes:
//! - `1` usage / configuration
//! - `2` file I/O and exports
//! - `3` data integrity
//! - `4` terminal UI

use thiserror::Error;

use crate::domain::PhaseId;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::new(3, format!("Growth data integrity error: {err}"))
    }
}

/// A phase whose samples break the catalog invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("phase '{phase}' has no samples")]
    EmptyPhase { phase: PhaseId },
    #[error("phase '{phase}' starts at day {day}, expected day 0")]
    FirstSampleNotAtZero { phase: PhaseId, day: u32 },
    #[error("phase '{phase}' samples are out of order: day {day} follows day {prev_day}")]
    UnsortedSamples { phase: PhaseId, prev_day: u32, day: u32 },
    #[error("phase '{phase}' has two samples at day {day}")]
    DuplicateSampleDay { phase: PhaseId, day: u32 },
    #[error("phase '{phase}' ends at day {last_day}, expected max day {max_day}")]
    LastSampleNotAtMaxDay { phase: PhaseId, last_day: u32, max_day: u32 },
    #[error("phase '{phase}' {field} shrinks between day {prev_day} and day {day}")]
    NonMonotonicGrowth {
        phase: PhaseId,
        field: &'static str,
        prev_day: u32,
        day: u32,
    },
    #[error("phase '{phase}' has a negative or non-finite {field} at day {day}")]
    NegativeMeasurement { phase: PhaseId, field: &'static str, day: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_data_integrity_exit_code() {
        let err: AppError = EngineError::DuplicateSampleDay {
            phase: PhaseId::Nursing,
            day: 5,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("two samples at day 5"));
        assert!(err.to_string().contains("nursing"));
    }
}
