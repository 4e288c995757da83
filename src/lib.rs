//! # IV Dash - Implied Volatility Dashboard
//!
//! A single-page desktop dashboard that visualizes options-market implied
//! volatility for one underlying asset. It loads a pre-computed table of
//! option quotes (strike, expiration, IV, volume) once at startup and
//! renders two views:
//!
//! - **Surface**: IV over (strike, days-to-expiration) for one observation
//!   date and option side
//! - **Skew**: call and put IV across strike for one (observation date,
//!   expiration date) pair, with a marker at the underlying price
//!
//! ## Key Components
//!
//! - **Data Loader**: reads the delimited quote table into the `Dataset`
//! - **Grid Builder**: filters one date, pivots to a (strike x DTE) grid,
//!   gap-fills along the DTE axis
//! - **Skew Extractor**: filters one (observation, expiration) pair into
//!   paired call/put IV series
//! - **View Selector**: dispatches the current UI selection to a builder
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iv_dash::prelude::*;
//!
//! // Load the quote table
//! let dataset = load_quotes("data/quotes.csv").unwrap();
//!
//! // Build the call surface for the first observation date
//! let date = dataset.observation_dates()[0];
//! let grid = VolGrid::build(&dataset, date, OptionSide::Call).unwrap();
//! println!("{} strikes x {} expirations", grid.strikes.len(), grid.dtes.len());
//! ```
//!
//! ## What This Dashboard Does NOT Do
//!
//! - Price options or solve for implied volatility
//! - Ingest real-time data or persist anything beyond the input table
//! - Handle more than one underlying per table

pub mod core;
pub mod data;
pub mod view;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        DashError, DashResult, Dataset, OptionSide, QuoteRow, SkewSlice, VolGrid,
    };

    // Data loading
    pub use crate::data::{load_quotes, read_quotes, REQUIRED_COLUMNS};

    // View dispatch
    pub use crate::view::{build_view, ViewData, ViewMode, ViewSelection};
}

// Re-export main types at crate root
pub use crate::core::{DashError, DashResult, Dataset};
