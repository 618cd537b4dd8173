//! Core data types for the revenue forecaster
//!
//! - `Observation`: one period of historical revenue
//! - `ForecastPoint`: one slot of the chart series
//! - `AccuracyStats`: held-out accuracy of the trend line
//! - `ForecastReport`: everything computed for one snapshot of the series

use crate::forecast::regression::LinearModel;
use serde::{Deserialize, Serialize};

/// A single monthly revenue observation
///
/// `index` is the zero-based chronological position in the series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub index: usize,
    pub period: String,
    pub value: f64,
}

impl Observation {
    pub fn new(index: usize, period: impl Into<String>, value: f64) -> Self {
        Self {
            index,
            period: period.into(),
            value,
        }
    }
}

/// Build observations from bare values, labelling each period by its position
///
/// Handy for fixtures and for callers whose periods carry no label.
pub fn observations_from_values(values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::new(i, (i + 1).to_string(), v))
        .collect()
}

/// One displayed period of the revenue chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    /// Period label (x-axis slot)
    pub period: String,
    /// Observed revenue, absent for forecast-only slots
    pub actual: Option<f64>,
    /// Trend line value at this slot
    pub fitted: f64,
    /// Prediction shown in this slot (the model evaluated one horizon ahead)
    pub predicted: Option<f64>,
}

/// Accuracy of a train-only model on the held-out tail of the series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AccuracyStats {
    pub train_count: usize,
    pub test_count: usize,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
    /// Coefficient of determination against the test set's own mean
    pub r2: f64,
}

impl std::fmt::Display for AccuracyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Train: {} • Test: {} • MAE: ${:.2} • RMSE: ${:.2} • MAPE: {:.2}% • R²: {:.3}",
            self.train_count, self.test_count, self.mae, self.rmse, self.mape, self.r2
        )
    }
}

/// Result of recomputing the forecast for one snapshot of the series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastReport {
    /// Trend fitted over every observation
    pub model: LinearModel,
    /// Chart series, one point per observation
    pub series: Vec<ForecastPoint>,
    /// Held-out accuracy; absent when the series is too short to split
    pub stats: Option<AccuracyStats>,
}
