//! # Trendline
//!
//! Revenue trend forecasting for a dashboard chart: fits a straight line to
//! monthly revenue, lays out the actual / trend / year-ahead series and
//! scores the trend on the most recent months.
//!
//! ## Modules
//!
//! - [`forecast`]: Pure forecasting core (regression, metrics, forecaster)
//! - [`source`]: Loading the monthly series from CSV or KPI JSON
//! - [`dashboard`]: Chart description, colour tokens and summary line
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use trendline::dashboard::{summary_line, ChartOptions, ChartSpec};
//! use trendline::forecast::RevenueForecaster;
//! use trendline::source::{observations_from_records, MonthlyRecord};
//!
//! let records = vec![
//!     MonthlyRecord::new("january", 15000.0),
//!     MonthlyRecord::new("february", 15800.0),
//!     MonthlyRecord::new("march", 16900.0),
//!     MonthlyRecord::new("april", 17400.0),
//! ];
//! let observations = observations_from_records(&records);
//!
//! let report = RevenueForecaster::new().report(&observations).unwrap();
//! if let Some(stats) = &report.stats {
//!     println!("{}", summary_line(stats));
//! }
//!
//! let chart = ChartSpec::build(&report, &ChartOptions::default());
//! assert_eq!(chart.rows.len(), 4);
//! ```

pub mod config;
pub mod dashboard;
pub mod forecast;
pub mod logging;
pub mod source;

// Re-export top-level types for convenience
pub use forecast::{
    AccuracyStats, ForecastError, ForecastPoint, ForecastReport, ForecastResult, LinearModel,
    Observation, RevenueForecaster,
};

pub use source::{MonthlyRecord, SourceError};

pub use dashboard::{ChartOptions, ChartSpec};

pub use config::{ChartConfig, Config, ConfigError, ForecastConfig, LoggingConfig};
