//! Ordinary least-squares trend line
//!
//! Fits `y = slope * x + intercept` over `(x, y)` pairs, where x is the
//! observation's position in the series.

use crate::forecast::error::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};

/// Minimum number of points needed to fit a line
pub const MIN_FIT_POINTS: usize = 2;

/// Most decimal places `round_to` honours; f64 carries about 15-17 significant digits
pub const MAX_PRECISION: u32 = 15;

/// A fitted linear trend. Immutable once fit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Fit a line through `(x, y)` points by ordinary least squares
    ///
    /// Fails with `InsufficientData` for fewer than two points.
    pub fn fit(points: &[(f64, f64)]) -> ForecastResult<Self> {
        if points.len() < MIN_FIT_POINTS {
            return Err(ForecastError::insufficient(
                "fit",
                MIN_FIT_POINTS,
                points.len(),
            ));
        }

        let n = points.len() as f64;

        let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
        let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
        let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
        let sum_x2: f64 = points.iter().map(|(x, _)| x * x).sum();

        let denominator = n * sum_x2 - sum_x.powi(2);

        // Only reachable when every x is identical; positions never are.
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = sum_y / n - slope * sum_x / n;

        Ok(Self { slope, intercept })
    }

    /// Value of the trend line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Copy of this model with both coefficients rounded to `places` decimals
    pub fn rounded(&self, places: u32) -> Self {
        Self {
            slope: round_to(self.slope, places),
            intercept: round_to(self.intercept, places),
        }
    }

    /// Sum of squared vertical errors of this line over `points`
    pub fn sum_squared_error(&self, points: &[(f64, f64)]) -> f64 {
        points
            .iter()
            .map(|&(x, y)| (y - self.predict(x)).powi(2))
            .sum()
    }
}

/// Round `value` to `places` decimal places, capped at [`MAX_PRECISION`]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_PRECISION) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: [(f64, f64); 5] = [(0.0, 2.0), (1.0, 4.0), (2.0, 5.0), (3.0, 4.0), (4.0, 5.0)];

    #[test]
    fn test_fit_matches_closed_form() {
        // x̄ = 2, ȳ = 4, Sxy = 6, Sxx = 10
        let model = LinearModel::fit(&FIXTURE).unwrap();
        assert!((model.slope - 0.6).abs() < 1e-12);
        assert!((model.intercept - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_fit_minimizes_squared_error() {
        let model = LinearModel::fit(&FIXTURE).unwrap();
        let best = model.sum_squared_error(&FIXTURE);

        for (ds, di) in [(0.1, 0.0), (-0.1, 0.0), (0.0, 0.1), (0.0, -0.1), (0.05, -0.2)] {
            let other = LinearModel {
                slope: model.slope + ds,
                intercept: model.intercept + di,
            };
            assert!(other.sum_squared_error(&FIXTURE) > best);
        }
    }

    #[test]
    fn test_fit_perfect_line() {
        let points = [(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)];
        let model = LinearModel::fit(&points).unwrap();
        assert!((model.slope - 100.0).abs() < 1e-9);
        assert!((model.intercept - 100.0).abs() < 1e-9);
        assert!((model.predict(4.0) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_two_points() {
        let model = LinearModel::fit(&[(0.0, 1.0), (1.0, 3.0)]).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!((model.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_rejects_short_input() {
        assert_eq!(
            LinearModel::fit(&[]),
            Err(ForecastError::insufficient("fit", 2, 0))
        );
        assert_eq!(
            LinearModel::fit(&[(0.0, 5.0)]),
            Err(ForecastError::insufficient("fit", 2, 1))
        );
    }

    #[test]
    fn test_rounded() {
        let model = LinearModel {
            slope: 1.23456,
            intercept: -7.891,
        };
        let r = model.rounded(2);
        assert_eq!(r.slope, 1.23);
        assert_eq!(r.intercept, -7.89);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_to_large_places_stays_finite() {
        assert_eq!(round_to(15000.5, 400), round_to(15000.5, MAX_PRECISION));
        assert_eq!(round_to(1.0e300, 15), 1.0e300);
    }
}
