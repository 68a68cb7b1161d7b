use crate::utils::maths_utils::{rolling_apply, rolling_mean, undefined};

/// Simple moving average over the trailing `period` values.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(data, period)
}

/// Recursive exponential moving average with `alpha = 2 / (span + 1)`.
///
/// Seeded from the first defined value, so it is defined from that index on.
/// An undefined input mid-series carries the previous average forward.
pub fn ema(data: &[f64], span: usize) -> Vec<f64> {
    let mut out = undefined(data.len());
    if span == 0 {
        return out;
    }
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut prev: Option<f64> = None;
    for (slot, &x) in out.iter_mut().zip(data) {
        prev = match (prev, x.is_nan()) {
            (None, true) => None,
            (None, false) => Some(x),
            (Some(p), true) => Some(p),
            (Some(p), false) => Some(alpha * x + (1.0 - alpha) * p),
        };
        if let Some(p) = prev {
            *slot = p;
        }
    }
    out
}

/// Linearly weighted moving average; the most recent value carries weight `period`.
pub fn wma(data: &[f64], period: usize) -> Vec<f64> {
    let weight_sum = (period * (period + 1)) as f64 / 2.0;
    rolling_apply(data, period, |w| {
        w.iter()
            .enumerate()
            .map(|(i, v)| (i + 1) as f64 * v)
            .sum::<f64>()
            / weight_sum
    })
}

/// Hull moving average: `WMA(2*WMA(n/2) - WMA(n), round(sqrt(n)))`.
pub fn hma(data: &[f64], period: usize) -> Vec<f64> {
    let half_period = period / 2;
    let sqrt_period = (period as f64).sqrt().round() as usize;
    if half_period == 0 || sqrt_period == 0 {
        return undefined(data.len());
    }

    let wma_half = wma(data, half_period);
    let wma_full = wma(data, period);
    let raw: Vec<f64> = wma_half
        .iter()
        .zip(&wma_full)
        .map(|(h, f)| 2.0 * h - f)
        .collect();

    wma(&raw, sqrt_period)
}
