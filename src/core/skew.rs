//! Volatility skew cross-section
//!
//! For one (observation date, expiration date) pair: call and put IV series
//! over strike, aligned by position, plus the underlying price for the
//! vertical spot marker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{DashError, DashResult};
use super::quote::Dataset;

/// Skew cross-section for a fixed (observation, expiration) pair.
///
/// Series keep the row order of the filtered subset; strikes are not
/// re-sorted. `call_iv` and `put_iv` are parallel to `strikes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkewSlice {
    pub observation: NaiveDate,
    pub expiration: NaiveDate,
    /// Underlying last price, from the first matching row
    pub underlying: f64,
    pub strikes: Vec<f64>,
    pub call_iv: Vec<Option<f64>>,
    pub put_iv: Vec<Option<f64>>,
}

impl SkewSlice {
    /// Extract the cross-section where both dates match exactly.
    ///
    /// All matching rows are expected to share one underlying price for an
    /// observation date; the first row's value wins, unvalidated.
    pub fn extract(
        dataset: &Dataset,
        observation: NaiveDate,
        expiration: NaiveDate,
    ) -> DashResult<Self> {
        let rows: Vec<_> = dataset
            .rows()
            .iter()
            .filter(|r| r.date == observation && r.expiration == expiration)
            .collect();

        let first = rows.first().ok_or_else(|| {
            DashError::no_data(format!(
                "the selected dates ({} expiring {})",
                observation, expiration
            ))
        })?;

        Ok(Self {
            observation,
            expiration,
            underlying: first.underlying,
            strikes: rows.iter().map(|r| r.strike).collect(),
            call_iv: rows.iter().map(|r| r.call_iv).collect(),
            put_iv: rows.iter().map(|r| r.put_iv).collect(),
        })
    }

    /// Number of strikes in the cross-section
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    /// (strike, call IV) points, skipping unquoted strikes
    pub fn call_points(&self) -> Vec<[f64; 2]> {
        Self::points(&self.strikes, &self.call_iv)
    }

    /// (strike, put IV) points, skipping unquoted strikes
    pub fn put_points(&self) -> Vec<[f64; 2]> {
        Self::points(&self.strikes, &self.put_iv)
    }

    fn points(strikes: &[f64], ivs: &[Option<f64>]) -> Vec<[f64; 2]> {
        strikes
            .iter()
            .zip(ivs.iter())
            .filter_map(|(&k, iv)| iv.map(|v| [k, v]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::test_support::row;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row("2023-01-03", 1, 510.0, "2023-01-04", 505.0, Some(0.45), Some(0.48)),
            row("2023-01-03", 1, 500.0, "2023-01-04", 505.0, Some(0.40), None),
            row("2023-01-03", 8, 500.0, "2023-01-11", 505.0, Some(0.42), Some(0.44)),
            row("2023-01-04", 0, 500.0, "2023-01-04", 506.5, Some(0.41), Some(0.43)),
        ])
    }

    #[test]
    fn test_extract_matching_pair() {
        let slice =
            SkewSlice::extract(&sample(), date("2023-01-03"), date("2023-01-04")).unwrap();

        assert_eq!(slice.len(), 2);
        assert_eq!(slice.call_iv.len(), slice.put_iv.len());
        assert_eq!(slice.underlying, 505.0);
        // Row order of the filtered subset, not sorted by strike
        assert_eq!(slice.strikes, vec![510.0, 500.0]);
    }

    #[test]
    fn test_points_skip_missing() {
        let slice =
            SkewSlice::extract(&sample(), date("2023-01-03"), date("2023-01-04")).unwrap();

        assert_eq!(slice.call_points(), vec![[510.0, 0.45], [500.0, 0.40]]);
        assert_eq!(slice.put_points(), vec![[510.0, 0.48]]);
    }

    #[test]
    fn test_underlying_first_row_wins() {
        // Same pair, two rows, differing underlying: first in input order wins.
        let dataset = Dataset::new(vec![
            row("2023-01-03", 1, 500.0, "2023-01-04", 505.0, Some(0.40), None),
            row("2023-01-03", 1, 510.0, "2023-01-04", 999.0, Some(0.45), None),
        ]);

        let slice =
            SkewSlice::extract(&dataset, date("2023-01-03"), date("2023-01-04")).unwrap();
        assert_eq!(slice.underlying, 505.0);
    }

    #[test]
    fn test_unknown_expiration_is_no_data() {
        let err =
            SkewSlice::extract(&sample(), date("2023-01-03"), date("2099-01-01")).unwrap_err();
        assert!(matches!(err, DashError::NoDataForSelection(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_no_cross_validation_of_pair() {
        // Both dates exist in the dataset, just never together.
        let err =
            SkewSlice::extract(&sample(), date("2023-01-04"), date("2023-01-11")).unwrap_err();
        assert!(matches!(err, DashError::NoDataForSelection(_)));
    }
}
