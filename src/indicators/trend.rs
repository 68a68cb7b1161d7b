use itertools::izip;

use crate::utils::maths_utils::{rolling_mean, undefined};

/// Average directional index with its directional indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AdxLines {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

/// True range: the widest of high-low and the gaps to the previous close.
/// The first period has no previous close and uses high-low alone.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let len = high.len().min(low.len()).min(close.len());
    (0..len)
        .map(|i| {
            let range = high[i] - low[i];
            if i == 0 {
                return range;
            }
            let prev_close = close[i - 1];
            range
                .max((high[i] - prev_close).abs())
                .max((low[i] - prev_close).abs())
        })
        .collect()
}

/// Average directional index using simple rolling means for every smoothing step.
///
/// Directional movement is clipped at zero but the smaller of +DM/-DM is not
/// suppressed. Output is defined from index `2 * period - 1`.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> AdxLines {
    let tr = true_range(high, low, close);
    let len = tr.len();

    let mut plus_dm = undefined(len);
    let mut minus_dm = undefined(len);
    for i in 1..len {
        plus_dm[i] = (high[i] - high[i - 1]).max(0.0);
        minus_dm[i] = (low[i - 1] - low[i]).max(0.0);
    }

    let atr = rolling_mean(&tr, period);
    let directional = |dm: &[f64]| -> Vec<f64> {
        rolling_mean(dm, period)
            .iter()
            .zip(&atr)
            .map(|(&avg_dm, &range)| {
                if avg_dm.is_nan() || range.is_nan() {
                    f64::NAN
                } else if range == 0.0 {
                    0.0
                } else {
                    100.0 * avg_dm / range
                }
            })
            .collect()
    };
    let plus_di = directional(&plus_dm);
    let minus_di = directional(&minus_dm);

    let dx: Vec<f64> = izip!(&plus_di, &minus_di)
        .map(|(&p, &m)| {
            if p.is_nan() || m.is_nan() {
                f64::NAN
            } else if p + m == 0.0 {
                0.0
            } else {
                100.0 * (p - m).abs() / (p + m)
            }
        })
        .collect();

    AdxLines {
        adx: rolling_mean(&dx, period),
        plus_di,
        minus_di,
    }
}
