//! The growth-curve engine.
//!
//! Every function here is pure: inputs are the static catalog plus caller-held
//! settings, outputs are fresh values. Front ends (CLI, TUI, exports) only consume
//! these results.

pub mod color;
pub mod dense;
pub mod ticks;

pub use color::*;
pub use dense::*;
pub use ticks::*;
