//! Data loading
//!
//! Reads the delimited quote table into the `Dataset` once at process start.

pub mod loader;

pub use loader::*;
