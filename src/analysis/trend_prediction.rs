use serde::{Deserialize, Serialize};

use crate::config::{ANALYSIS, HeuristicSettings};
use crate::error::AnalysisError;
use crate::models::Trend;
use crate::utils::maths_utils::{mean_and_population_std, round_to, safe_div};

pub const PREDICTION_DISCLAIMER: &str = "EDUCATIONAL ONLY - Not financial advice";

/// Naive short-term projection from trailing momentum and volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPrediction {
    pub current_trend: Trend,
    pub predicted_price: f64,
    /// % change over the momentum lookback
    pub momentum: f64,
    /// Population std / mean over the volatility lookback, in %
    pub volatility: f64,
    pub confidence: f64,
    pub periods: usize,
    pub disclaimer: String,
}

pub fn predict_trend(prices: &[f64]) -> Result<TrendPrediction, AnalysisError> {
    predict_trend_with(prices, ANALYSIS.heuristics.prediction_periods)
}

pub fn predict_trend_with(prices: &[f64], periods: usize) -> Result<TrendPrediction, AnalysisError> {
    let h: &HeuristicSettings = &ANALYSIS.heuristics;
    AnalysisError::require(1, prices.len())?;
    let n = prices.len();
    let last = prices[n - 1];

    let momentum = if n >= h.momentum_lookback {
        let base = prices[n - h.momentum_lookback];
        safe_div(last - base, base, 0.0) * 100.0
    } else {
        0.0
    };

    let tail = &prices[n.saturating_sub(h.volatility_lookback)..];
    let (mean, std) = mean_and_population_std(tail);
    let volatility = safe_div(std, mean, 0.0) * 100.0;

    let (current_trend, predicted_price) = if momentum > h.trend_momentum_pct {
        (Trend::Bullish, last * (1.0 + momentum / 100.0 * 0.5))
    } else if momentum < -h.trend_momentum_pct {
        (Trend::Bearish, last * (1.0 + momentum / 100.0 * 0.5))
    } else {
        (Trend::Neutral, last)
    };

    let confidence = (50.0 + momentum.abs() * 5.0 + (100.0 - volatility) * 0.2)
        .min(h.prediction_max_confidence);

    Ok(TrendPrediction {
        current_trend,
        predicted_price: round_to(predicted_price, 5),
        momentum: round_to(momentum, 2),
        volatility: round_to(volatility, 2),
        confidence: round_to(confidence, 1),
        periods,
        disclaimer: PREDICTION_DISCLAIMER.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::maths_utils::assert_close;

    #[test]
    fn test_strong_rise_is_bullish() {
        // 10 periods back is 1.00, last is 1.05: +5% momentum
        let mut prices = vec![1.0; 20];
        prices.push(1.05);
        let p = predict_trend(&prices).unwrap();

        assert_eq!(p.current_trend, Trend::Bullish);
        assert_eq!(p.momentum, 5.0);
        assert_close(p.predicted_price, 1.07625);
        assert_eq!(p.confidence, 75.0);
        assert_eq!(p.periods, 10);
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let p = predict_trend(&[1.25; 30]).unwrap();
        assert_eq!(p.current_trend, Trend::Neutral);
        assert_eq!(p.momentum, 0.0);
        assert_eq!(p.volatility, 0.0);
        assert_eq!(p.predicted_price, 1.25);
        // 50 + 0 + 100 * 0.2 = 70
        assert_eq!(p.confidence, 70.0);
    }

    #[test]
    fn test_fall_is_bearish() {
        let mut prices = vec![2.0; 15];
        prices.push(1.9);
        let p = predict_trend(&prices).unwrap();
        assert_eq!(p.current_trend, Trend::Bearish);
        assert_eq!(p.momentum, -5.0);
        assert_close(p.predicted_price, 1.8525);
    }

    #[test]
    fn test_short_history_has_zero_momentum() {
        let p = predict_trend(&[1.0, 1.5, 2.0]).unwrap();
        assert_eq!(p.momentum, 0.0);
        assert_eq!(p.current_trend, Trend::Neutral);
        assert!(p.volatility > 0.0);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            predict_trend(&[]),
            Err(AnalysisError::InsufficientHistory { required: 1, available: 0 })
        ));
    }
}
