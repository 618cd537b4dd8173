//! Forecast error types
//!
//! The forecasting core has exactly one failure mode: being asked to work on
//! a series that is too short for the requested operation.

use thiserror::Error;

/// Errors that can occur while fitting or evaluating a forecast
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer observations than the operation needs
    #[error("Insufficient data for {operation}: need at least {required} observations, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
}

impl ForecastError {
    pub(crate) fn insufficient(operation: &'static str, required: usize, actual: usize) -> Self {
        ForecastError::InsufficientData {
            operation,
            required,
            actual,
        }
    }
}

/// Result type alias for forecast operations
pub type ForecastResult<T> = Result<T, ForecastError>;
