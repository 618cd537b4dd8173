//! Revenue Forecaster
//!
//! Fits a linear trend to monthly revenue, lays out the chart series and
//! scores the trend on the held-out tail of the series.
//!
//! Every operation is a pure function of its input: callers recompute from
//! scratch whenever the upstream series changes.

use crate::forecast::error::{ForecastError, ForecastResult};
use crate::forecast::metrics::{
    mean_absolute_error, mean_absolute_percentage_error, r_squared, root_mean_squared_error,
    test_split_size, DEFAULT_MAX_TEST_COUNT,
};
use crate::forecast::regression::{round_to, LinearModel, MAX_PRECISION};
use crate::forecast::types::{AccuracyStats, ForecastPoint, ForecastReport, Observation};

/// Periods ahead shown in each slot's prediction
pub const DEFAULT_HORIZON_OFFSET: usize = 12;

/// Minimum series length for a train/test evaluation
pub const MIN_EVALUATE_POINTS: usize = 3;

/// Linear-trend forecaster for an ordered revenue series
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueForecaster {
    /// Offset added to a slot's position for its `predicted` value
    horizon_offset: usize,
    /// Cap on held-out observations
    max_test_count: usize,
    /// Decimal places for coefficients and predictions (None = exact)
    precision: Option<u32>,
}

impl Default for RevenueForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl RevenueForecaster {
    /// Create a forecaster with the dashboard defaults
    pub fn new() -> Self {
        Self {
            horizon_offset: DEFAULT_HORIZON_OFFSET,
            max_test_count: DEFAULT_MAX_TEST_COUNT,
            precision: None,
        }
    }

    /// Set how many periods ahead each slot's prediction looks
    pub fn with_horizon_offset(mut self, offset: usize) -> Self {
        self.horizon_offset = offset;
        self
    }

    /// Set the cap on held-out observations (at least 1)
    pub fn with_max_test_count(mut self, count: usize) -> Self {
        self.max_test_count = count.max(1);
        self
    }

    /// Round coefficients and predictions to `places` decimals (at most `MAX_PRECISION`)
    pub fn with_precision(mut self, places: Option<u32>) -> Self {
        self.precision = places.map(|p| p.min(MAX_PRECISION));
        self
    }

    pub fn horizon_offset(&self) -> usize {
        self.horizon_offset
    }

    pub fn max_test_count(&self) -> usize {
        self.max_test_count
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Fit the trend line over every observation
    ///
    /// x is the observation's zero-based position in `observations`.
    pub fn fit(&self, observations: &[Observation]) -> ForecastResult<LinearModel> {
        let points: Vec<(f64, f64)> = observations
            .iter()
            .enumerate()
            .map(|(i, o)| (i as f64, o.value))
            .collect();

        let model = LinearModel::fit(&points)?;

        Ok(match self.precision {
            Some(places) => model.rounded(places),
            None => model,
        })
    }

    /// Chart series: one point per observation
    ///
    /// `predicted` in slot i is the model evaluated at `i + horizon_offset`,
    /// shown under slot i's own period label. No trailing slots are added.
    pub fn build_display_series(
        &self,
        observations: &[Observation],
        model: &LinearModel,
    ) -> Vec<ForecastPoint> {
        observations
            .iter()
            .enumerate()
            .map(|(i, o)| ForecastPoint {
                period: o.period.clone(),
                actual: Some(o.value),
                fitted: self.predict(model, i),
                predicted: Some(self.predict(model, i + self.horizon_offset)),
            })
            .collect()
    }

    /// Score a train-only trend on the trailing observations
    ///
    /// Fails with `InsufficientData` for fewer than three observations.
    pub fn evaluate(&self, observations: &[Observation]) -> ForecastResult<AccuracyStats> {
        let total = observations.len();
        if total < MIN_EVALUATE_POINTS {
            return Err(ForecastError::insufficient(
                "evaluate",
                MIN_EVALUATE_POINTS,
                total,
            ));
        }

        let test_count = test_split_size(total, self.max_test_count);
        let train_count = total - test_count;
        let (train, test) = observations.split_at(train_count);

        let model = self.fit(train)?;

        let actual: Vec<f64> = test.iter().map(|o| o.value).collect();
        let predicted: Vec<f64> = (train_count..total)
            .map(|i| self.predict(&model, i))
            .collect();

        let stats = AccuracyStats {
            train_count,
            test_count,
            mae: mean_absolute_error(&actual, &predicted),
            rmse: root_mean_squared_error(&actual, &predicted),
            mape: mean_absolute_percentage_error(&actual, &predicted),
            r2: r_squared(&actual, &predicted),
        };

        tracing::debug!(
            train = train_count,
            test = test_count,
            mae = stats.mae,
            rmse = stats.rmse,
            r2 = stats.r2,
            "Evaluated trend on held-out tail"
        );

        Ok(stats)
    }

    /// Recompute everything the dashboard shows for one snapshot
    ///
    /// Needs at least two observations for the trend; accuracy stats are
    /// left out when the series is too short to split.
    pub fn report(&self, observations: &[Observation]) -> ForecastResult<ForecastReport> {
        let model = self.fit(observations)?;
        let series = self.build_display_series(observations, &model);

        let stats = match self.evaluate(observations) {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping accuracy stats");
                None
            }
        };

        tracing::debug!(
            points = series.len(),
            slope = model.slope,
            intercept = model.intercept,
            "Built forecast report"
        );

        Ok(ForecastReport {
            model,
            series,
            stats,
        })
    }

    fn predict(&self, model: &LinearModel, position: usize) -> f64 {
        let y = model.predict(position as f64);
        match self.precision {
            Some(places) => round_to(y, places),
            None => y,
        }
    }
}
