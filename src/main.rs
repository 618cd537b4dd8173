//! Trendline CLI
//!
//! Command-line front end for the revenue forecaster:
//! - Fit the trend and print the chart series
//! - Score the trend on the held-out tail
//! - Emit the chart description for a renderer
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use trendline::config::{generate_default_config, Config};
use trendline::dashboard::{summary_line, ChartSpec};
use trendline::forecast::{ForecastPoint, Observation};
use trendline::source::{load_records, observations_from_records};

#[derive(Parser)]
#[command(name = "trendline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Linear revenue trend, year-ahead prediction and accuracy stats")]
#[command(long_about = "Trendline fits a straight-line trend to monthly revenue.\nInput is a CSV file (month,revenue) or a KPI JSON export with monthlyData.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trend, chart series and accuracy summary
    Report {
        /// Revenue file (.csv or .json)
        path: PathBuf,
    },

    /// Chart series only
    Series {
        /// Revenue file (.csv or .json)
        path: PathBuf,
    },

    /// Accuracy of the trend on the held-out months
    Evaluate {
        /// Revenue file (.csv or .json)
        path: PathBuf,
    },

    /// Chart description as JSON
    Chart {
        /// Revenue file (.csv or .json)
        path: PathBuf,
        /// Include the predicted-revenue line
        #[arg(long)]
        show_predictions: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load_default(),
    };

    trendline::logging::init(&config.logging).context("Failed to initialize logging")?;

    tracing::debug!("Trendline v{}", env!("CARGO_PKG_VERSION"));

    let forecaster = config.forecast.forecaster();

    match cli.command {
        Commands::Report { path } => {
            let observations = load_observations(&path)?;
            let report = forecaster.report(&observations)?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                "csv" => print_csv(&report.series)?,
                _ => {
                    println!(
                        "Trend: revenue = {:.2} * month + {:.2}",
                        report.model.slope, report.model.intercept
                    );
                    match &report.stats {
                        Some(stats) => println!("{}", summary_line(stats)),
                        None => println!("Not enough months to score the trend"),
                    }
                    println!();
                    print_table(&report.series);
                }
            }
        }

        Commands::Series { path } => {
            let observations = load_observations(&path)?;
            let model = forecaster.fit(&observations)?;
            let series = forecaster.build_display_series(&observations, &model);

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&series)?),
                "csv" => print_csv(&series)?,
                _ => print_table(&series),
            }
        }

        Commands::Evaluate { path } => {
            let observations = load_observations(&path)?;
            let stats = forecaster.evaluate(&observations)?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
                "csv" => print_csv(&[stats])?,
                _ => println!("{}", summary_line(&stats)),
            }
        }

        Commands::Chart {
            path,
            show_predictions,
            output,
        } => {
            let observations = load_observations(&path)?;
            let report = forecaster.report(&observations)?;

            let mut options = config.chart.options();
            options.show_predictions |= show_predictions;

            let chart = ChartSpec::build(&report, &options);
            let json = serde_json::to_string_pretty(&chart)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &json)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Chart written to {:?}", path);
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn load_observations(path: &Path) -> anyhow::Result<Vec<Observation>> {
    let records =
        load_records(path).with_context(|| format!("Failed to load revenue from {:?}", path))?;
    Ok(observations_from_records(&records))
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(series: &[ForecastPoint]) {
    if series.is_empty() {
        println!("No data");
        return;
    }

    println!(
        "{:<12} | {:>12} | {:>12} | {:>12}",
        "Month", "Actual", "Trend", "Predicted"
    );
    println!("{}", "-".repeat(57));

    for point in series {
        println!(
            "{:<12} | {:>12} | {:>12} | {:>12}",
            point.period,
            format_value(point.actual),
            format!("{:.2}", point.fitted),
            format_value(point.predicted)
        );
    }
}

fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    write_csv(std::io::stdout(), rows)
}

fn write_csv<W: Write, T: Serialize>(out: W, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendline::forecast::{observations_from_values, RevenueForecaster};

    #[test]
    fn test_write_stats_csv() {
        let observations = observations_from_values(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let stats = RevenueForecaster::new().evaluate(&observations).unwrap();

        let mut out = Vec::new();
        write_csv(&mut out, &[stats]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("train_count,test_count,mae,rmse,mape,r2")
        );
        assert!(lines.next().unwrap().starts_with("3,2,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_series_csv() {
        let series = vec![ForecastPoint {
            period: "january".to_string(),
            actual: Some(15000.0),
            fitted: 15000.0,
            predicted: None,
        }];

        let mut out = Vec::new();
        write_csv(&mut out, &series).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("january,15000"));
    }
}
