//! Revenue Forecasting Core
//!
//! Pure, side-effect-free trend fitting and accuracy scoring:
//!
//! - **types**: Observation, ForecastPoint, AccuracyStats, ForecastReport
//! - **regression**: Ordinary least-squares `LinearModel`
//! - **metrics**: MAE, RMSE, MAPE, R² and the train/test split rule
//! - **forecaster**: `RevenueForecaster` tying them together
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use trendline::forecast::{observations_from_values, RevenueForecaster};
//!
//! let observations = observations_from_values(&[100.0, 200.0, 300.0, 400.0, 500.0]);
//! let forecaster = RevenueForecaster::new();
//!
//! let model = forecaster.fit(&observations).unwrap();
//! let series = forecaster.build_display_series(&observations, &model);
//! assert_eq!(series.len(), 5);
//!
//! let stats = forecaster.evaluate(&observations).unwrap();
//! assert_eq!(stats.test_count, 2);
//! assert!(stats.mae < 1e-6);
//! ```

pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod regression;
pub mod types;

// Re-export commonly used types
pub use error::{ForecastError, ForecastResult};
pub use forecaster::{RevenueForecaster, DEFAULT_HORIZON_OFFSET, MIN_EVALUATE_POINTS};
pub use metrics::{
    mean_absolute_error, mean_absolute_percentage_error, r_squared, root_mean_squared_error,
    test_split_size, DEFAULT_MAX_TEST_COUNT,
};
pub use regression::{LinearModel, MAX_PRECISION, MIN_FIT_POINTS};
pub use types::{observations_from_values, AccuracyStats, ForecastPoint, ForecastReport, Observation};
