use crate::indicators::moving_average::{ema, sma};
use crate::utils::maths_utils::{rolling_max, rolling_mean, rolling_min, undefined};

/// MACD line, its signal line and the histogram between them.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Stochastic oscillator %K and its %D smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticLines {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Relative strength index over simple (not Wilder) averages of gains and losses.
///
/// The first delta is taken as zero so the output is defined from index
/// `period - 1`. No losses in the window saturates to 100, no gains to 0,
/// and a window with neither reads 50.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    let deltas: Vec<f64> = std::iter::once(0.0)
        .chain(data.windows(2).map(|w| w[1] - w[0]))
        .take(data.len())
        .collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| relative_strength(gain, loss))
        .collect()
}

fn relative_strength(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Stochastic oscillator. A window with no high-low range reads 50.
pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticLines {
    let lowest = rolling_min(low, k_period);
    let highest = rolling_max(high, k_period);

    let k: Vec<f64> = itertools::izip!(close, &lowest, &highest)
        .map(|(&c, &lo, &hi)| {
            if lo.is_nan() || hi.is_nan() {
                f64::NAN
            } else if hi == lo {
                50.0
            } else {
                100.0 * (c - lo) / (hi - lo)
            }
        })
        .collect();
    let d = sma(&k, d_period);

    StochasticLines { k, d }
}

/// Rate of change in percent versus the value `period` steps back.
///
/// Undefined when the reference value is zero.
pub fn roc(data: &[f64], period: usize) -> Vec<f64> {
    lagged(data, period, |now, then| {
        if then == 0.0 {
            f64::NAN
        } else {
            (now / then - 1.0) * 100.0
        }
    })
}

/// Absolute change versus the value `period` steps back.
pub fn momentum(data: &[f64], period: usize) -> Vec<f64> {
    lagged(data, period, |now, then| now - then)
}

fn lagged<F: Fn(f64, f64) -> f64>(data: &[f64], period: usize, f: F) -> Vec<f64> {
    let mut out = undefined(data.len());
    for i in period..data.len() {
        out[i] = f(data[i], data[i - period]);
    }
    out
}

/// Moving average convergence divergence.
pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdLines {
    let ema_fast = ema(data, fast_period);
    let ema_slow = ema(data, slow_period);

    let macd: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal = ema(&macd, signal_period);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdLines {
        macd,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::maths_utils::assert_close;

    #[test]
    fn test_rsi_defined_from_window_end() {
        let data = [1.0, 2.0, 1.5, 2.5, 2.0, 3.0];
        let out = rsi(&data, 3);
        assert!(out[..2].iter().all(|v| v.is_nan()));
        // window deltas at index 2: [0, +1, -0.5] -> rs = 2
        assert_close(out[2], 100.0 - 100.0 / 3.0);
        // window at index 5: [+1, -0.5, +1] -> rs = 4
        assert_close(out[5], 80.0);
    }

    #[test]
    fn test_rsi_saturates_without_losses_or_gains() {
        let rising: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert!(rsi(&rising, 14)[13..].iter().all(|&v| v == 100.0));
        assert!(rsi(&falling, 14)[13..].iter().all(|&v| v == 0.0));
        assert!(rsi(&[1.0; 20], 14)[13..].iter().all(|&v| v == 50.0));
    }

    #[test]
    fn test_rsi_bounded() {
        let data: Vec<f64> = (0..100).map(|i| 1.0 + (i as f64 * 0.7).sin() * 0.05).collect();
        for v in rsi(&data, 14).into_iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_stochastic_range_position() {
        let high = [2.0, 3.0, 4.0, 5.0];
        let low = [1.0, 2.0, 3.0, 4.0];
        let close = [1.5, 2.5, 3.5, 4.0];
        let lines = stochastic(&high, &low, &close, 3, 2);
        assert!(lines.k[1].is_nan());
        // index 2: (3.5 - 1) / (4 - 1)
        assert_close(lines.k[2], 250.0 / 3.0);
        // index 3: (4 - 2) / (5 - 2)
        assert_close(lines.k[3], 200.0 / 3.0);
        assert!(lines.d[2].is_nan());
        assert_close(lines.d[3], 75.0);
    }

    #[test]
    fn test_stochastic_flat_window_reads_midpoint() {
        let flat = [1.0; 5];
        let lines = stochastic(&flat, &flat, &flat, 3, 3);
        assert_eq!(lines.k[4], 50.0);
    }

    #[test]
    fn test_roc_and_momentum() {
        let data = [100.0, 102.0, 105.0, 99.0];
        let r = roc(&data, 2);
        let m = momentum(&data, 2);
        assert!(r[1].is_nan() && m[1].is_nan());
        assert_close(r[2], 5.0);
        assert_close(m[3], -3.0);
        assert!(roc(&[0.0, 1.0], 1)[1].is_nan());
    }

    #[test]
    fn test_macd_histogram_is_line_minus_signal() {
        let data: Vec<f64> = (0..60).map(|i| 1.1 + (i as f64 / 5.0).cos() * 0.01).collect();
        let lines = macd(&data, 12, 26, 9);
        for i in 0..data.len() {
            assert_eq!(lines.histogram[i], lines.macd[i] - lines.signal[i]);
        }
        assert_eq!(lines.macd[0], 0.0);
    }
}
