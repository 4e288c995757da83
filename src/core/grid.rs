//! Volatility surface grid
//!
//! Pivots one observation date's quotes into a dense (strike x DTE) grid of
//! implied volatilities and gap-fills missing cells along the DTE axis.
//! Rebuilt on every selection change; cheap for in-memory tables.

use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::error::{DashError, DashResult};
use super::quote::{Dataset, OptionSide};

/// Dense IV grid for one observation date and option side.
///
/// `vols` has shape `(strikes.len(), dtes.len())`; cells with no observed
/// value and no directional fill stay `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolGrid {
    /// Observation date the grid was built for
    pub date: NaiveDate,
    /// Option side the grid was built for
    pub side: OptionSide,
    /// Distinct strikes observed on the date, ascending
    pub strikes: Vec<f64>,
    /// Distinct days-to-expiration observed on the date, ascending
    pub dtes: Vec<u32>,
    /// IV grid `[strike, dte]`, `NaN` where absent
    pub vols: Array2<f64>,
}

impl VolGrid {
    /// Pivot the dataset's rows for `date` into a gap-filled grid.
    ///
    /// Duplicate (strike, DTE) pairs are a data-quality condition, not an
    /// error: the last value in input order wins, including a missing IV.
    pub fn build(dataset: &Dataset, date: NaiveDate, side: OptionSide) -> DashResult<Self> {
        let rows = dataset.rows_for_date(date);
        if rows.is_empty() {
            return Err(DashError::no_data(format!("the selected date {}", date)));
        }

        let mut strikes: Vec<f64> = rows.iter().map(|r| r.strike).collect();
        strikes.sort_by(|a, b| a.partial_cmp(b).unwrap());
        strikes.dedup();

        let mut dtes: Vec<u32> = rows.iter().map(|r| r.dte).collect();
        dtes.sort_unstable();
        dtes.dedup();

        let mut vols = Array2::from_elem((strikes.len(), dtes.len()), f64::NAN);
        for row in &rows {
            let si = strikes.iter().position(|&k| k == row.strike).unwrap();
            let ti = dtes.iter().position(|&d| d == row.dte).unwrap();
            vols[[si, ti]] = row.iv(side).unwrap_or(f64::NAN);
        }

        let mut grid = Self {
            date,
            side,
            strikes,
            dtes,
            vols,
        };
        grid.fill_gaps();
        Ok(grid)
    }

    /// Propagate values along the DTE axis: forward pass first, then a
    /// backward pass for still-missing leading cells. A strike row with no
    /// observed value at all stays empty. Idempotent.
    fn fill_gaps(&mut self) {
        for si in 0..self.strikes.len() {
            let mut last = None;
            for ti in 0..self.dtes.len() {
                if self.vols[[si, ti]].is_nan() {
                    if let Some(v) = last {
                        self.vols[[si, ti]] = v;
                    }
                } else {
                    last = Some(self.vols[[si, ti]]);
                }
            }

            let mut last = None;
            for ti in (0..self.dtes.len()).rev() {
                if self.vols[[si, ti]].is_nan() {
                    if let Some(v) = last {
                        self.vols[[si, ti]] = v;
                    }
                } else {
                    last = Some(self.vols[[si, ti]]);
                }
            }
        }
    }

    /// IV at a cell, `None` where the grid is empty
    pub fn value(&self, si: usize, ti: usize) -> Option<f64> {
        let v = self.vols[[si, ti]];
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }

    /// Strike coordinate per cell, broadcast to the grid's shape
    pub fn strike_mesh(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.vols.dim(), |(si, _)| self.strikes[si])
    }

    /// DTE coordinate per cell, broadcast to the grid's shape
    pub fn dte_mesh(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.vols.dim(), |(_, ti)| self.dtes[ti] as f64)
    }

    /// (min, max) over observed cells, for color scaling
    pub fn vol_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in self.vols.iter() {
            if v.is_nan() {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }
}
