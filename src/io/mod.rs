//! Input/output helpers.
//!
//! - dense-table CSV export (`export`)
//! - dense-table JSON read/write (`table`)

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
