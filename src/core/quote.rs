//! Quote rows and the loaded dataset
//!
//! One `QuoteRow` per (observation date, expiration, strike) with both the
//! call and put side of the market on it. The `Dataset` is loaded once at
//! startup and read-only afterwards; builders receive it by reference.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Option side (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Label for titles and widgets
    pub fn label(&self) -> &'static str {
        match self {
            OptionSide::Call => "Call",
            OptionSide::Put => "Put",
        }
    }
}

/// One observation of an option contract on a given date.
///
/// Field names map to the external file's header names, which carry
/// bracket-delimited tokens (e.g. a strike column literally named
/// `[STRIKE]`). The observation date column is plain `Date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Observation date
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Days to expiration; source files may serialize this as a float
    #[serde(rename = "[DTE]", deserialize_with = "dte_from_number")]
    pub dte: u32,
    /// Strike price
    #[serde(rename = "[STRIKE]")]
    pub strike: f64,
    /// Expiration date
    #[serde(rename = "[EXPIRE_DATE]")]
    pub expiration: NaiveDate,
    /// Underlying last price at observation
    #[serde(rename = "[UNDERLYING_LAST]")]
    pub underlying: f64,
    /// Call implied volatility, if quoted
    #[serde(rename = "[C_IV]")]
    pub call_iv: Option<f64>,
    /// Call volume
    #[serde(rename = "[C_VOLUME]")]
    pub call_volume: Option<u64>,
    /// Put implied volatility, if quoted
    #[serde(rename = "[P_IV]")]
    pub put_iv: Option<f64>,
    /// Put volume
    #[serde(rename = "[P_VOLUME]")]
    pub put_volume: Option<u64>,
}

/// Accept `1` or `1.000000` for the DTE column, rounding to the nearest day.
fn dte_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "DTE must be a non-negative number, got {}",
            raw
        )));
    }
    Ok(raw.round() as u32)
}

impl QuoteRow {
    /// Implied volatility for the given side
    pub fn iv(&self, side: OptionSide) -> Option<f64> {
        match side {
            OptionSide::Call => self.call_iv,
            OptionSide::Put => self.put_iv,
        }
    }

    /// Traded volume for the given side
    pub fn volume(&self, side: OptionSide) -> u64 {
        match side {
            OptionSide::Call => self.call_volume.unwrap_or(0),
            OptionSide::Put => self.put_volume.unwrap_or(0),
        }
    }
}

/// The full quote table, loaded once per process.
///
/// Distinct-value views are recomputed from the rows on demand and never
/// stored separately, so they cannot drift from the data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    rows: Vec<QuoteRow>,
}

impl Dataset {
    pub fn new(rows: Vec<QuoteRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct observation dates, ascending
    pub fn observation_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rows.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Distinct expiration dates, ascending
    pub fn expiration_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rows.iter().map(|r| r.expiration).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Rows observed on the given date, in input order
    pub fn rows_for_date(&self, date: NaiveDate) -> Vec<&QuoteRow> {
        self.rows.iter().filter(|r| r.date == date).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Bare-bones row builder for grid/skew tests
    pub fn row(
        date: &str,
        dte: u32,
        strike: f64,
        expiration: &str,
        underlying: f64,
        call_iv: Option<f64>,
        put_iv: Option<f64>,
    ) -> QuoteRow {
        QuoteRow {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            dte,
            strike,
            expiration: NaiveDate::parse_from_str(expiration, "%Y-%m-%d").unwrap(),
            underlying,
            call_iv,
            call_volume: Some(10),
            put_iv,
            put_volume: Some(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;

    #[test]
    fn test_side_accessors() {
        let r = row("2023-01-03", 1, 500.0, "2023-01-04", 505.0, Some(0.45), Some(0.50));
        assert_eq!(r.iv(OptionSide::Call), Some(0.45));
        assert_eq!(r.iv(OptionSide::Put), Some(0.50));
        assert_eq!(r.volume(OptionSide::Call), 10);
        assert_eq!(r.volume(OptionSide::Put), 5);
        assert_eq!(OptionSide::Call.label(), "Call");
    }

    #[test]
    fn test_distinct_dates_sorted_deduped() {
        let dataset = Dataset::new(vec![
            row("2023-01-04", 1, 500.0, "2023-01-05", 505.0, Some(0.4), None),
            row("2023-01-03", 1, 500.0, "2023-01-06", 505.0, Some(0.4), None),
            row("2023-01-03", 2, 510.0, "2023-01-05", 505.0, None, Some(0.5)),
        ]);

        let obs = dataset.observation_dates();
        assert_eq!(obs.len(), 2);
        assert!(obs[0] < obs[1]);

        let exp = dataset.expiration_dates();
        assert_eq!(exp.len(), 2);
        assert_eq!(exp[0], NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    }

    #[test]
    fn test_rows_for_date_preserves_order() {
        let dataset = Dataset::new(vec![
            row("2023-01-03", 2, 510.0, "2023-01-05", 505.0, Some(0.4), None),
            row("2023-01-04", 1, 500.0, "2023-01-05", 505.0, Some(0.4), None),
            row("2023-01-03", 1, 500.0, "2023-01-04", 505.0, Some(0.4), None),
        ]);

        let day = dataset.rows_for_date(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].strike, 510.0);
        assert_eq!(day[1].strike, 500.0);
    }
}
