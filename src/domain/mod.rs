//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - catalog keys and labels (`PhaseId`, `StageLabel`)
//! - sparse and dense growth data (`GrowthSample`, `GrowthPhase`, `DenseRecord`)
//! - caller-held view settings (`ExplorerConfig`, `WeightInterval`)
//! - export schema (`DenseTableFile`)

pub mod types;

pub use types::*;
