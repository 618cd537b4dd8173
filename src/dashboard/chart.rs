//! Revenue Chart Description
//!
//! Renderer-neutral description of the "Revenue and Predictions" line chart.
//! A rendering surface draws it as-is; nothing here touches a canvas.

use super::theme::{GREY, PRIMARY, SECONDARY, TERTIARY};
use crate::forecast::ForecastReport;
use serde::Serialize;

pub const ACTUAL_KEY: &str = "Actual Revenue";
pub const REGRESSION_KEY: &str = "Regression Line";
pub const PREDICTED_KEY: &str = "Predicted Revenue";

const TITLE: &str = "Revenue and Predictions";
const SUBTITLE: &str =
    "Charted revenue and predicted revenue based on a simple linear regression model";
const TOGGLE_LABEL: &str = "Show Predicted Revenue for Next Year";

/// Options that change what the chart shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// Draw the dashed predicted-revenue line
    pub show_predictions: bool,
    /// Fixed y-axis range
    pub y_domain: (f64, f64),
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_predictions: false,
            y_domain: (12000.0, 26000.0),
        }
    }
}

/// One x-axis slot, keyed the way the series reference it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartRow {
    pub name: String,
    #[serde(rename = "Actual Revenue")]
    pub actual_revenue: Option<f64>,
    #[serde(rename = "Regression Line")]
    pub regression_line: f64,
    #[serde(rename = "Predicted Revenue")]
    pub predicted_revenue: Option<f64>,
}

/// How a single line is drawn
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesSpec {
    pub data_key: &'static str,
    pub color: &'static str,
    /// Line width; 0 draws points only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Dot outline width; None draws no dots
    pub dot_width: Option<f64>,
    /// Dash pattern such as "5 5"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisSpec {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_key: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_prefix: Option<&'static str>,
    pub font_size: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridSpec {
    pub stroke: &'static str,
    pub dash: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub left: u32,
    pub bottom: u32,
}

/// Complete chart description
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Accuracy summary shown under the subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub toggle_label: &'static str,
    pub rows: Vec<ChartRow>,
    pub series: Vec<SeriesSpec>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub grid: GridSpec,
    pub margin: Margin,
}

impl ChartSpec {
    /// Lay out the chart for a forecast report
    pub fn build(report: &ForecastReport, options: &ChartOptions) -> Self {
        let rows = report
            .series
            .iter()
            .map(|p| ChartRow {
                name: p.period.clone(),
                actual_revenue: p.actual,
                regression_line: p.fitted,
                predicted_revenue: p.predicted,
            })
            .collect();

        let mut series = vec![
            SeriesSpec {
                data_key: ACTUAL_KEY,
                color: PRIMARY.main(),
                stroke_width: Some(0.0),
                dot_width: Some(5.0),
                dash: None,
            },
            SeriesSpec {
                data_key: REGRESSION_KEY,
                color: TERTIARY.main(),
                stroke_width: None,
                dot_width: None,
                dash: None,
            },
        ];

        if options.show_predictions {
            series.push(SeriesSpec {
                data_key: PREDICTED_KEY,
                color: SECONDARY.main(),
                stroke_width: None,
                dot_width: Some(1.0),
                dash: Some("5 5"),
            });
        }

        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            summary: report.stats.as_ref().map(super::summary_line),
            toggle_label: TOGGLE_LABEL,
            rows,
            series,
            x_axis: AxisSpec {
                label: "Month",
                data_key: Some("name"),
                domain: None,
                tick_prefix: None,
                font_size: 10,
            },
            y_axis: AxisSpec {
                label: "Revenue in USD",
                data_key: None,
                domain: Some(options.y_domain),
                tick_prefix: Some("$"),
                font_size: 10,
            },
            grid: GridSpec {
                stroke: GREY.shade(800).unwrap_or(GREY.main()),
                dash: "3 3",
            },
            margin: Margin {
                top: 20,
                right: 75,
                left: 20,
                bottom: 80,
            },
        }
    }

    /// Data keys of the series that will be drawn
    pub fn visible_keys(&self) -> Vec<&'static str> {
        self.series.iter().map(|s| s.data_key).collect()
    }
}
