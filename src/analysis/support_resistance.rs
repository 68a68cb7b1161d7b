use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;
use crate::utils::maths_utils::round_to;

/// Support and resistance levels taken from local extrema of a close series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Highest local highs first.
    pub resistance: Vec<f64>,
    /// Lowest local lows first.
    pub support: Vec<f64>,
    pub current_price: Option<f64>,
    /// Mean of the trailing closes, `None` on empty input.
    pub pivot: Option<f64>,
}

pub fn support_resistance(prices: &[f64]) -> SupportResistance {
    let h = &ANALYSIS.heuristics;
    support_resistance_with(prices, h.extrema_window, h.extrema_levels)
}

/// A point is a local high when it is >= every point within `window` on both sides
/// (lows are symmetric). Points closer than `window` to either end are never extrema.
pub fn support_resistance_with(prices: &[f64], window: usize, levels: usize) -> SupportResistance {
    let mut highs = Vec::new();
    let mut lows = Vec::new();

    if window > 0 && prices.len() > 2 * window {
        for i in window..prices.len() - window {
            let p = prices[i];
            let neighbours = prices[i - window..i]
                .iter()
                .chain(&prices[i + 1..=i + window]);

            if neighbours.clone().all(|&x| p >= x) {
                highs.push(p);
            }
            if neighbours.clone().all(|&x| p <= x) {
                lows.push(p);
            }
        }
    }

    highs.sort_by(|a, b| b.total_cmp(a));
    lows.sort_by(|a, b| a.total_cmp(b));

    let tail = &prices[prices.len().saturating_sub(ANALYSIS.heuristics.pivot_lookback)..];
    let pivot = (!tail.is_empty()).then(|| round_to(tail.iter().sum::<f64>() / tail.len() as f64, 5));

    SupportResistance {
        resistance: highs.into_iter().take(levels).map(|v| round_to(v, 5)).collect(),
        support: lows.into_iter().take(levels).map(|v| round_to(v, 5)).collect(),
        current_price: prices.last().copied(),
        pivot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_isolated_peak_and_trough() {
        let mut prices = vec![1.10; 30];
        prices[8] = 1.12;
        prices[20] = 1.07;
        let sr = support_resistance_with(&prices, 5, 3);

        assert_eq!(sr.resistance[0], 1.12);
        assert_eq!(sr.support[0], 1.07);
        assert_eq!(sr.current_price, Some(1.10));
    }

    #[test]
    fn test_levels_are_ordered_and_truncated() {
        // Zig-zag with period 12 so each peak clears a 5-point window
        let prices: Vec<f64> = (0..96)
            .map(|i| {
                let phase = (i % 12) as f64;
                let tri = if phase <= 6.0 { phase } else { 12.0 - phase };
                1.0 + tri * 0.01 + i as f64 * 0.0001
            })
            .collect();
        let sr = support_resistance_with(&prices, 5, 3);

        assert_eq!(sr.resistance.len(), 3);
        assert!(sr.resistance.windows(2).all(|w| w[0] >= w[1]));
        assert!(sr.support.windows(2).all(|w| w[0] <= w[1]));
        assert!(sr.support.len() <= 3);
    }

    #[test]
    fn test_short_series_has_no_extrema() {
        let sr = support_resistance(&[1.0, 1.1, 1.2]);
        assert!(sr.resistance.is_empty());
        assert!(sr.support.is_empty());
        assert_eq!(sr.pivot, Some(1.1));

        let empty = support_resistance(&[]);
        assert_eq!(empty.current_price, None);
        assert_eq!(empty.pivot, None);
    }

    #[test]
    fn test_pivot_uses_trailing_twenty() {
        let mut prices = vec![5.0; 10];
        prices.extend(vec![2.0; 20]);
        assert_eq!(support_resistance(&prices).pivot, Some(2.0));
    }
}
