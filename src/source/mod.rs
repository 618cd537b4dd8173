//! Revenue Sources
//!
//! Loads the ordered monthly revenue series the forecaster consumes:
//! - CSV files with a period and a revenue column
//! - KPI JSON documents (`[{ "monthlyData": [{ "month", "revenue" }] }]`)
//!
//! Revenue cells may be plain numbers or currency text such as `"$14,032.00"`.

mod csv_import;
mod kpi;

pub use csv_import::{import_revenue_csv, CsvRevenueImporter, RevenueImportResult};
pub use kpi::{load_kpi_json, parse_kpi_json};

use crate::forecast::Observation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One month of upstream revenue data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRecord {
    pub month: String,
    pub revenue: f64,
}

impl MonthlyRecord {
    pub fn new(month: impl Into<String>, revenue: f64) -> Self {
        Self {
            month: month.into(),
            revenue,
        }
    }
}

/// Errors that can occur while loading a revenue series
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No revenue records found in {0}")]
    Empty(String),
}

/// Map records to observations, indexed by position
pub fn observations_from_records(records: &[MonthlyRecord]) -> Vec<Observation> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| Observation::new(i, r.month.clone(), r.revenue))
        .collect()
}

/// Load records from a file, choosing the format by extension
///
/// `.json` files are read as KPI documents, everything else as CSV.
pub fn load_records(path: &Path) -> Result<Vec<MonthlyRecord>, SourceError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let records = if is_json {
        load_kpi_json(path)?
    } else {
        let result = import_revenue_csv(path)?;
        for error in result.errors.iter().take(10) {
            tracing::warn!(%error, "CSV row skipped");
        }
        result.records
    };

    if records.is_empty() {
        return Err(SourceError::Empty(path.display().to_string()));
    }

    tracing::info!(count = records.len(), ?path, "Loaded revenue records");
    Ok(records)
}

/// Parse a revenue cell: a number, optionally with `$`, thousands separators
/// and surrounding whitespace
pub fn parse_revenue(raw: &str) -> Result<f64, SourceError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Err(SourceError::Parse("empty revenue value".to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| SourceError::Parse(format!("invalid revenue value: {}", raw.trim())))?;

    if !value.is_finite() {
        return Err(SourceError::Parse(format!(
            "non-finite revenue value: {}",
            raw.trim()
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_revenue() {
        assert_eq!(parse_revenue("15000").unwrap(), 15000.0);
        assert_eq!(parse_revenue(" $14,032.67 ").unwrap(), 14032.67);
        assert_eq!(parse_revenue("-$1,000").unwrap(), -1000.0);
        assert!(matches!(parse_revenue(""), Err(SourceError::Parse(_))));
        assert!(matches!(parse_revenue("abc"), Err(SourceError::Parse(_))));
        assert!(matches!(parse_revenue("NaN"), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_observations_from_records() {
        let records = vec![
            MonthlyRecord::new("january", 10.0),
            MonthlyRecord::new("february", 12.0),
        ];
        let obs = observations_from_records(&records);

        assert_eq!(obs[0], Observation::new(0, "january", 10.0));
        assert_eq!(obs[1].index, 1);
        assert_eq!(obs[1].period, "february");
    }

    #[test]
    fn test_load_records_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("revenue.csv");
        std::fs::write(&csv_path, "month,revenue\njanuary,100\nfebruary,200\n").unwrap();
        assert_eq!(load_records(&csv_path).unwrap().len(), 2);

        let json_path = dir.path().join("kpis.JSON");
        let mut file = std::fs::File::create(&json_path).unwrap();
        write!(
            file,
            r#"[{{"monthlyData": [{{"month": "january", "revenue": 100}}]}}]"#
        )
        .unwrap();
        assert_eq!(
            load_records(&json_path).unwrap(),
            vec![MonthlyRecord::new("january", 100.0)]
        );
    }

    #[test]
    fn test_load_records_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "month,revenue\n").unwrap();

        assert!(matches!(load_records(&path), Err(SourceError::Empty(_))));
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("/nonexistent/revenue.csv"));
        assert!(matches!(result, Err(SourceError::Csv(_))));
    }
}
