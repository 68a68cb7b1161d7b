use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// A series of `len` undefined (NaN) values.
#[inline]
pub fn undefined(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// Applies `f` to every trailing window of `period` values.
///
/// Output is aligned index-for-index with `data`. Indices before the first
/// full window, and windows containing an undefined value, stay NaN.
pub fn rolling_apply<F>(data: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = undefined(data.len());
    if period == 0 || period > data.len() {
        return out;
    }
    for (end, window) in (period - 1..).zip(data.windows(period)) {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[end] = f(window);
    }
    out
}

pub fn rolling_mean(data: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(data, period, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Sample standard deviation (n - 1 denominator) over each trailing window.
pub fn rolling_std_dev(data: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(data, period, |w| w.std_dev())
}

pub fn rolling_max(data: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(data, period, get_max)
}

pub fn rolling_min(data: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(data, period, get_min)
}

pub fn get_max(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::NAN;
    }
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::NAN;
    }
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Latest value of a series, `None` when empty or undefined.
pub fn latest(data: &[f64]) -> Option<f64> {
    data.last().copied().filter(|v| !v.is_nan())
}

/// Simple period-over-period returns. A zero base price yields a zero return.
pub fn pct_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

/// Mean and population standard deviation of `data` (zero for empty input).
pub fn mean_and_population_std(data: &[f64]) -> (f64, f64) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    (data.mean(), data.population_std_dev())
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Division that saturates to `fallback` instead of producing NaN or infinity.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        fallback
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_apply_leaves_prefix_undefined() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_close(out[2], 2.0);
        assert_close(out[3], 3.0);
    }

    #[test]
    fn test_rolling_apply_propagates_undefined_inputs() {
        let out = rolling_mean(&[f64::NAN, 2.0, 3.0, 4.0], 2);
        assert!(out[1].is_nan());
        assert_close(out[2], 2.5);
    }

    #[test]
    fn test_window_longer_than_data() {
        assert!(rolling_max(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
        assert!(rolling_min(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_extrema() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(rolling_max(&data, 3)[2..], [4.0, 4.0, 5.0]);
        assert_eq!(rolling_min(&data, 3)[2..], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_population_std_of_flat_series_is_zero() {
        let (mean, std) = mean_and_population_std(&[2.0; 5]);
        assert_close(mean, 2.0);
        assert_eq!(std, 0.0);
    }

    #[test]
    fn test_safe_div_and_round() {
        assert_eq!(safe_div(1.0, 0.0, 100.0), 100.0);
        assert_eq!(round_to(1.234567, 5), 1.23457);
        assert_eq!(latest(&[1.0, f64::NAN]), None);
    }
}
