//! View selection and dispatch
//!
//! Stateless bridge between the UI shell and the builders: the shell hands
//! over the current selection, gets back a chart-ready structure. Every call
//! is independent and fully determined by the selection values.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::{DashResult, Dataset, OptionSide, SkewSlice, VolGrid};

/// The two dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Surface,
    Skew,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Surface, ViewMode::Skew];

    /// Label for the sidebar selector
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Surface => "Implied Volatility Surface",
            ViewMode::Skew => "Skew Analysis",
        }
    }
}

/// The user's current selection, one variant per view mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewSelection {
    Surface {
        date: NaiveDate,
        side: OptionSide,
    },
    Skew {
        observation: NaiveDate,
        expiration: NaiveDate,
    },
}

impl ViewSelection {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewSelection::Surface { .. } => ViewMode::Surface,
            ViewSelection::Skew { .. } => ViewMode::Skew,
        }
    }
}

/// Chart-ready output of one build
#[derive(Debug, Clone)]
pub enum ViewData {
    Surface(VolGrid),
    Skew(SkewSlice),
}

/// Dispatch the selection to the matching builder.
pub fn build_view(dataset: &Dataset, selection: ViewSelection) -> DashResult<ViewData> {
    debug!(?selection, "rebuilding view");
    match selection {
        ViewSelection::Surface { date, side } => {
            VolGrid::build(dataset, date, side).map(ViewData::Surface)
        }
        ViewSelection::Skew {
            observation,
            expiration,
        } => SkewSlice::extract(dataset, observation, expiration).map(ViewData::Skew),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::test_support::row;
    use crate::core::DashError;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row("2023-01-03", 1, 500.0, "2023-01-04", 505.0, Some(0.45), Some(0.48)),
            row("2023-01-03", 1, 510.0, "2023-01-04", 505.0, Some(0.40), Some(0.43)),
        ])
    }

    #[test]
    fn test_dispatch_surface() {
        let selection = ViewSelection::Surface {
            date: date("2023-01-03"),
            side: OptionSide::Call,
        };
        assert_eq!(selection.mode(), ViewMode::Surface);

        match build_view(&sample(), selection).unwrap() {
            ViewData::Surface(grid) => {
                assert_eq!(grid.strikes, vec![500.0, 510.0]);
                assert_eq!(grid.dtes, vec![1]);
            }
            ViewData::Skew(_) => panic!("expected a surface"),
        }
    }

    #[test]
    fn test_dispatch_skew() {
        let selection = ViewSelection::Skew {
            observation: date("2023-01-03"),
            expiration: date("2023-01-04"),
        };
        assert_eq!(selection.mode(), ViewMode::Skew);

        match build_view(&sample(), selection).unwrap() {
            ViewData::Skew(slice) => {
                assert_eq!(slice.len(), 2);
                assert_eq!(slice.underlying, 505.0);
            }
            ViewData::Surface(_) => panic!("expected a skew slice"),
        }
    }

    #[test]
    fn test_no_data_passes_through() {
        let selection = ViewSelection::Skew {
            observation: date("2023-01-03"),
            expiration: date("2099-01-01"),
        };
        let err = build_view(&sample(), selection).unwrap_err();
        assert!(matches!(err, DashError::NoDataForSelection(_)));
    }
}
