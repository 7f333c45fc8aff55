//! Terminal plotting for the CLI (`growth plot`).

pub mod ascii;

pub use ascii::*;
