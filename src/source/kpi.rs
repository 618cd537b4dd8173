//! KPI JSON documents
//!
//! The dashboard's upstream API returns an array of KPI documents; the
//! revenue series is the first document's `monthlyData`. Other fields
//! (expenses, daily data, totals) are ignored.

use super::{parse_revenue, MonthlyRecord, SourceError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpiDocument {
    #[serde(default)]
    monthly_data: Vec<MonthlyEntry>,
}

#[derive(Debug, Deserialize)]
struct MonthlyEntry {
    month: String,
    revenue: RevenueValue,
}

/// Revenue as the API may send it: a number or a currency string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RevenueValue {
    Number(f64),
    Text(String),
}

impl RevenueValue {
    fn value(&self) -> Result<f64, SourceError> {
        match self {
            RevenueValue::Number(n) => Ok(*n),
            RevenueValue::Text(s) => parse_revenue(s),
        }
    }
}

/// Parse the monthly revenue series out of a KPI JSON string
pub fn parse_kpi_json(json: &str) -> Result<Vec<MonthlyRecord>, SourceError> {
    let documents: Vec<KpiDocument> = serde_json::from_str(json)?;

    let Some(first) = documents.into_iter().next() else {
        return Ok(Vec::new());
    };

    first
        .monthly_data
        .into_iter()
        .map(|entry| {
            let revenue = entry.revenue.value().map_err(|e| {
                SourceError::Parse(format!("month {}: {}", entry.month, e))
            })?;
            Ok(MonthlyRecord::new(entry.month, revenue))
        })
        .collect()
}

/// Load the monthly revenue series from a KPI JSON file
pub fn load_kpi_json(path: &Path) -> Result<Vec<MonthlyRecord>, SourceError> {
    let content = std::fs::read_to_string(path)?;
    parse_kpi_json(&content)
}
