//! Dashboard Contract
//!
//! What the rendering surface consumes: the colour tokens, the chart
//! description and the one-line accuracy summary.

pub mod chart;
pub mod theme;

pub use chart::{ChartOptions, ChartRow, ChartSpec, SeriesSpec};

use crate::forecast::AccuracyStats;

/// Human-readable accuracy line shown under the chart title
///
/// `Train: 10 • Test: 2 • MAE: $412.50 • RMSE: $498.01 • MAPE: 2.10% • R²: 0.871`
pub fn summary_line(stats: &AccuracyStats) -> String {
    stats.to_string()
}
