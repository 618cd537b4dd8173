//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dashboard::ChartOptions;
use crate::forecast::{
    RevenueForecaster, DEFAULT_HORIZON_OFFSET, DEFAULT_MAX_TEST_COUNT, MAX_PRECISION,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecaster configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_horizon_offset")]
    pub horizon_offset: usize,

    #[serde(default = "default_max_test_count")]
    pub max_test_count: usize,

    /// Decimal places for coefficients and predictions; unset keeps exact values
    #[serde(default)]
    pub precision: Option<u32>,
}

fn default_horizon_offset() -> usize {
    DEFAULT_HORIZON_OFFSET
}

fn default_max_test_count() -> usize {
    DEFAULT_MAX_TEST_COUNT
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_offset: default_horizon_offset(),
            max_test_count: default_max_test_count(),
            precision: None,
        }
    }
}

impl ForecastConfig {
    /// Build a forecaster with these settings
    pub fn forecaster(&self) -> RevenueForecaster {
        RevenueForecaster::new()
            .with_horizon_offset(self.horizon_offset)
            .with_max_test_count(self.max_test_count)
            .with_precision(self.precision)
    }
}

/// Chart configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub show_predictions: bool,

    #[serde(default = "default_y_min")]
    pub y_min: f64,

    #[serde(default = "default_y_max")]
    pub y_max: f64,
}

fn default_y_min() -> f64 {
    12000.0
}

fn default_y_max() -> f64 {
    26000.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_predictions: false,
            y_min: default_y_min(),
            y_max: default_y_max(),
        }
    }
}

impl ChartConfig {
    pub fn options(&self) -> ChartOptions {
        ChartOptions {
            show_predictions: self.show_predictions,
            y_domain: (self.y_min, self.y_max),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    ///
    /// Overrides that leave the config invalid are dropped in favour of the defaults.
    pub fn from_env() -> Self {
        Self::from_overrides(env_lookup)
    }

    /// Load configuration with environment variable overrides
    ///
    /// Validation runs once, after the overrides are applied.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_overrides(env_lookup);
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("trendline").join("config.toml")),
            Some(PathBuf::from("./trendline.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject settings the forecaster or chart cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.horizon_offset == 0 {
            return Err(ConfigError::Invalid(
                "forecast.horizon_offset must be at least 1".to_string(),
            ));
        }
        if self.forecast.max_test_count == 0 {
            return Err(ConfigError::Invalid(
                "forecast.max_test_count must be at least 1".to_string(),
            ));
        }
        if let Some(precision) = self.forecast.precision {
            if precision > MAX_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "forecast.precision ({}) must be at most {}",
                    precision, MAX_PRECISION
                )));
            }
        }
        if self.chart.y_min >= self.chart.y_max {
            return Err(ConfigError::Invalid(format!(
                "chart.y_min ({}) must be below chart.y_max ({})",
                self.chart.y_min, self.chart.y_max
            )));
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn from_overrides(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        config.apply_overrides(lookup);

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring environment overrides");
                Config::default()
            }
        }
    }

    /// Apply `TRENDLINE_*` overrides; `lookup` returns a variable's value if set
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Forecast overrides
        if let Some(horizon) = parse_override(&lookup, "TRENDLINE_HORIZON") {
            self.forecast.horizon_offset = horizon;
        }
        if let Some(max_test) = parse_override(&lookup, "TRENDLINE_MAX_TEST") {
            self.forecast.max_test_count = max_test;
        }
        if let Some(precision) = parse_override(&lookup, "TRENDLINE_PRECISION") {
            self.forecast.precision = Some(precision);
        }

        // Chart overrides
        if let Some(show) = lookup("TRENDLINE_SHOW_PREDICTIONS") {
            self.chart.show_predictions = show.to_lowercase() != "false" && show != "0";
        }

        // Logging overrides
        if let Some(level) = lookup("TRENDLINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TRENDLINE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Trendline Configuration
#
# Environment variables override these settings:
# - TRENDLINE_HORIZON
# - TRENDLINE_MAX_TEST
# - TRENDLINE_PRECISION
# - TRENDLINE_SHOW_PREDICTIONS
# - TRENDLINE_LOG_LEVEL
# - TRENDLINE_LOG_FORMAT

[forecast]
# Periods ahead shown in each month's predicted value
horizon_offset = 12

# Most trailing months held out when scoring the trend
max_test_count = 2

# Round coefficients and predictions to this many decimals, 0-15 (unset = exact)
# precision = 2

[chart]
# Draw the dashed predicted-revenue line
show_predictions = false

# Fixed y-axis range (USD)
y_min = 12000.0
y_max = 26000.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.forecast.horizon_offset, 12);
        assert_eq!(config.forecast.max_test_count, 2);
        assert_eq!(config.forecast.precision, None);
        assert!(!config.chart.show_predictions);
        assert_eq!(config.chart.options().y_domain, (12000.0, 26000.0));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.forecast.forecaster(), RevenueForecaster::new());
        assert_eq!(config.chart.y_max, 26000.0);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            "[forecast]\nprecision = 2\n\n[chart]\nshow_predictions = true\n",
        )
        .unwrap();

        assert_eq!(config.forecast.horizon_offset, 12);
        assert_eq!(config.forecast.forecaster().precision(), Some(2));
        assert!(config.chart.options().show_predictions);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendline.toml");
        std::fs::write(&path, "[forecast]\nhorizon_offset = 6\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.forecast.horizon_offset, 6);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let garbled = dir.path().join("garbled.toml");
        std::fs::write(&garbled, "[forecast\nhorizon_offset = ").unwrap();
        assert!(matches!(Config::load(&garbled), Err(ConfigError::Parse { .. })));

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "[chart]\ny_min = 30000.0\n").unwrap();
        assert!(matches!(Config::load(&invalid), Err(ConfigError::Invalid(_))));
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("TRENDLINE_HORIZON", "6"),
            ("TRENDLINE_MAX_TEST", " 3 "),
            ("TRENDLINE_PRECISION", "2"),
            ("TRENDLINE_SHOW_PREDICTIONS", "true"),
            ("TRENDLINE_LOG_LEVEL", "debug"),
            ("TRENDLINE_LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.forecast.horizon_offset, 6);
        assert_eq!(config.forecast.max_test_count, 3);
        assert_eq!(config.forecast.precision, Some(2));
        assert!(config.chart.show_predictions);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_unparseable_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("TRENDLINE_HORIZON", "twelve"),
            ("TRENDLINE_PRECISION", "-1"),
            ("TRENDLINE_SHOW_PREDICTIONS", "0"),
        ]));

        assert_eq!(config.forecast.horizon_offset, 12);
        assert_eq!(config.forecast.precision, None);
        assert!(!config.chart.show_predictions);
    }

    #[test]
    fn test_invalid_env_only_overrides_fall_back_to_defaults() {
        let config = Config::from_overrides(lookup_from(&[("TRENDLINE_HORIZON", "0")]));
        assert_eq!(config.forecast.horizon_offset, 12);

        let config = Config::from_overrides(lookup_from(&[("TRENDLINE_PRECISION", "400")]));
        assert_eq!(config.forecast.precision, None);

        let config = Config::from_overrides(lookup_from(&[("TRENDLINE_MAX_TEST", "4")]));
        assert_eq!(config.forecast.max_test_count, 4);
    }

    #[test]
    fn test_override_can_repair_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendline.toml");
        std::fs::write(&path, "[forecast]\nhorizon_offset = 0\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));

        let mut config = Config::read_file(&path).unwrap();
        config.apply_overrides(lookup_from(&[("TRENDLINE_HORIZON", "12")]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_excess_precision() {
        let config: Config = toml::from_str("[forecast]\nprecision = 400\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config: Config = toml::from_str("[forecast]\nprecision = 15\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_horizon() {
        let mut config = Config::default();
        config.forecast.horizon_offset = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
