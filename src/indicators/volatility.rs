use itertools::izip;

use crate::indicators::moving_average::sma;
use crate::indicators::trend::true_range;
use crate::utils::maths_utils::{rolling_max, rolling_mean, rolling_min, rolling_std_dev};

/// Upper, middle and lower envelope around a price series.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger bands: SMA middle band with `std_dev_multiplier` sample standard deviations either side.
pub fn bollinger_bands(data: &[f64], period: usize, std_dev_multiplier: f64) -> Bands {
    let middle = sma(data, period);
    let std = rolling_std_dev(data, period);

    let upper = izip!(&middle, &std)
        .map(|(m, s)| m + s * std_dev_multiplier)
        .collect();
    let lower = izip!(&middle, &std)
        .map(|(m, s)| m - s * std_dev_multiplier)
        .collect();

    Bands {
        upper,
        middle,
        lower,
    }
}

/// Average true range as a simple rolling mean.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    rolling_mean(&true_range(high, low, close), period)
}

/// Donchian channel: rolling highest high, lowest low and their midpoint.
pub fn donchian_channel(high: &[f64], low: &[f64], period: usize) -> Bands {
    let upper = rolling_max(high, period);
    let lower = rolling_min(low, period);
    let middle = izip!(&upper, &lower).map(|(u, l)| (u + l) / 2.0).collect();

    Bands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::maths_utils::assert_close;

    #[test]
    fn test_bollinger_values() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let bands = bollinger_bands(&data, 3, 2.0);
        assert!(bands.upper[1].is_nan() && bands.lower[1].is_nan());
        // sample std of [1, 2, 3] is 1
        assert_close(bands.middle[2], 2.0);
        assert_close(bands.upper[2], 4.0);
        assert_close(bands.lower[2], 0.0);
    }

    #[test]
    fn test_bollinger_ordering() {
        let data: Vec<f64> = (0..80).map(|i| 1.1 + (i as f64 * 1.3).sin() * 0.02).collect();
        let bands = bollinger_bands(&data, 20, 2.0);
        for i in 19..data.len() {
            assert!(bands.upper[i] >= bands.middle[i]);
            assert!(bands.middle[i] >= bands.lower[i]);
        }
    }

    #[test]
    fn test_atr_of_constant_range() {
        let high = [1.2; 6];
        let low = [1.0; 6];
        let close = [1.1; 6];
        let out = atr(&high, &low, &close, 3);
        assert!(out[1].is_nan());
        assert!(out[2..].iter().all(|v| (v - 0.2).abs() < 1e-12));
    }

    #[test]
    fn test_donchian_channel() {
        let high = [1.0, 3.0, 2.0, 1.5];
        let low = [0.5, 1.0, 0.8, 1.2];
        let channel = donchian_channel(&high, &low, 2);
        assert!(channel.upper[0].is_nan());
        assert_eq!(channel.upper[1..], [3.0, 3.0, 2.0]);
        assert_eq!(channel.lower[1..], [0.5, 0.8, 0.8]);
        assert_close(channel.middle[3], 1.4);
    }
}
