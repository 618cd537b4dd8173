//! Accuracy metrics for held-out predictions
//!
//! All functions take the observed values first and the predictions second.
//! Mismatched or empty inputs yield 0.0 rather than NaN.

/// Default cap on the number of held-out observations
pub const DEFAULT_MAX_TEST_COUNT: usize = 2;

/// Number of trailing observations held out for evaluation
///
/// `min(max_test, max(1, total - 2))`: at least one, never more than the
/// cap, and always leaving two points to fit when `total >= 3`.
pub fn test_split_size(total: usize, max_test: usize) -> usize {
    max_test.min(total.saturating_sub(2).max(1))
}

fn valid(actual: &[f64], predicted: &[f64]) -> bool {
    !actual.is_empty() && actual.len() == predicted.len()
}

/// Mean absolute error
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return 0.0;
    }

    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Root mean squared error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return 0.0;
    }

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    mse.sqrt()
}

/// Mean absolute percentage error, in percent
///
/// A zero observation is divided by 1 instead.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return 0.0;
    }

    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| {
            let denominator = if a == 0.0 { 1.0 } else { a };
            ((a - p) / denominator).abs()
        })
        .sum();

    total / actual.len() as f64 * 100.0
}

/// Coefficient of determination against the mean of `actual`
///
/// Defined as exactly 1 when `actual` has zero variance.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if !valid(actual, predicted) {
        return 0.0;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    }
}
