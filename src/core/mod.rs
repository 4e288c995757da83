//! Core data types for the IV dashboard
//!
//! Defines fundamental types:
//! - QuoteRow / Dataset: the loaded quote table
//! - VolGrid: pivoted, gap-filled surface grid
//! - SkewSlice: fixed-expiry cross-section
//! - DashError: error taxonomy

pub mod error;
pub mod grid;
pub mod quote;
pub mod skew;

pub use error::*;
pub use grid::*;
pub use quote::*;
pub use skew::*;
