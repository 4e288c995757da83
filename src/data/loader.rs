//! CSV quote-table loader
//!
//! The external file is delimited text with bracket-delimited header tokens
//! (e.g. the strike column is literally named `[STRIKE]`). Headers are
//! validated up front so a schema mismatch fails with the full list of
//! missing columns instead of a per-row parse error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::core::{DashError, DashResult, Dataset, QuoteRow};

/// Column names as they appear in the source file's header.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "[DTE]",
    "[STRIKE]",
    "[EXPIRE_DATE]",
    "[UNDERLYING_LAST]",
    "[C_IV]",
    "[C_VOLUME]",
    "[P_IV]",
    "[P_VOLUME]",
];

/// Load the quote table from a file path. No retries; a failure here is
/// fatal to the dashboard.
pub fn load_quotes<P: AsRef<Path>>(path: P) -> DashResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_quotes(BufReader::new(file))?;

    info!(
        rows = dataset.len(),
        observation_dates = dataset.observation_dates().len(),
        expiration_dates = dataset.expiration_dates().len(),
        "loaded quote table from {}",
        path.display()
    );
    Ok(dataset)
}

/// Parse the quote table from any reader.
pub fn read_quotes<R: Read>(reader: R) -> DashResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&name| !headers.iter().any(|h| h == name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: QuoteRow = result?;
        rows.push(row);
    }

    Ok(Dataset::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionSide;
    use chrono::NaiveDate;

    const HEADER: &str =
        "Date,[DTE],[STRIKE],[EXPIRE_DATE],[UNDERLYING_LAST],[C_IV],[C_VOLUME],[P_IV],[P_VOLUME]";

    #[test]
    fn test_read_basic_table() {
        let csv = format!(
            "{}\n2023-01-03,1.000000,500.0,2023-01-04,505.36,0.45,120,0.48,80\n\
             2023-01-03,1.000000,510.0,2023-01-04,505.36,0.40,95,,0",
            HEADER
        );

        let dataset = read_quotes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(first.dte, 1);
        assert_eq!(first.strike, 500.0);
        assert_eq!(first.underlying, 505.36);
        assert_eq!(first.iv(OptionSide::Call), Some(0.45));
        assert_eq!(first.volume(OptionSide::Put), 80);

        // Empty IV and zero volume on the second row
        let second = &dataset.rows()[1];
        assert_eq!(second.iv(OptionSide::Put), None);
        assert_eq!(second.volume(OptionSide::Put), 0);
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let csv = "Date, [DTE], [STRIKE], [EXPIRE_DATE], [UNDERLYING_LAST], [C_IV], [C_VOLUME], [P_IV], [P_VOLUME]\n\
                   2023-01-03, 7.000000, 495.0, 2023-01-10, 505.36, 0.38, 10, 0.41, 12";

        let dataset = read_quotes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows()[0].dte, 7);
    }

    #[test]
    fn test_missing_columns_reported() {
        let csv = "Date,[DTE],[STRIKE],[EXPIRE_DATE],[C_IV],[C_VOLUME],[P_IV],[P_VOLUME]\n\
                   2023-01-03,1,500.0,2023-01-04,0.45,120,0.48,80";

        let err = read_quotes(csv.as_bytes()).unwrap_err();
        match err {
            DashError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["[UNDERLYING_LAST]".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_dte_rejected() {
        let csv = format!("{}\n2023-01-03,-1,500.0,2023-01-04,505.36,0.45,120,0.48,80", HEADER);
        assert!(read_quotes(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_quotes("does/not/exist.csv").unwrap_err();
        assert!(err.is_fatal());
    }
}
