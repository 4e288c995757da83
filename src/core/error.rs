//! Error types for the IV dashboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No data available for {0}")]
    NoDataForSelection(String),
}

pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoDataForSelection(msg.into())
    }

    /// Load failures are fatal at startup; an empty selection is not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NoDataForSelection(_))
    }
}
