//! Static growth data.
//!
//! The catalog is compiled into the binary and never mutated; everything else in
//! the crate derives from it.

pub mod catalog;

pub use catalog::{catalog, phase, validate_phase};
