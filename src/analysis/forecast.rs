use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;
use crate::error::AnalysisError;
use crate::indicators::sma;
use crate::utils::maths_utils::{mean_and_population_std, pct_returns, round_to};

pub const FORECAST_DISCLAIMER: &str = "EDUCATIONAL FORECAST ONLY - Not guaranteed";
pub const BACKTEST_DISCLAIMER: &str = "Past performance does not guarantee future results";
pub const BACKTEST_STRATEGY: &str = "MA Crossover";

/// Structured result for the presentation layer: the report, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeuristicOutcome<T> {
    Report(T),
    Error { error: String },
}

impl<T> From<Result<T, AnalysisError>> for HeuristicOutcome<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(report) => HeuristicOutcome::Report(report),
            Err(e) => HeuristicOutcome::Error {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastScenarios {
    pub bullish: f64,
    pub expected: f64,
    pub bearish: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub current_price: f64,
    pub periods: usize,
    pub forecasts: ForecastScenarios,
    pub expected_change_pct: f64,
    pub volatility_index: f64,
    pub disclaimer: String,
}

pub fn forecast(prices: &[f64]) -> Result<ForecastReport, AnalysisError> {
    forecast_with(prices, ANALYSIS.heuristics.forecast_periods)
}

/// Linear projection of the trailing mean return, widened by one return std each way.
pub fn forecast_with(prices: &[f64], periods: usize) -> Result<ForecastReport, AnalysisError> {
    let h = &ANALYSIS.heuristics;
    AnalysisError::require(h.forecast_min_periods, prices.len())?;

    let returns = pct_returns(prices);
    let recent = &returns[returns.len().saturating_sub(h.forecast_lookback)..];
    let (mu, sigma) = mean_and_population_std(recent);

    let current = prices[prices.len() - 1];
    let p = periods as f64;

    Ok(ForecastReport {
        current_price: round_to(current, 5),
        periods,
        forecasts: ForecastScenarios {
            bullish: round_to(current * (1.0 + mu * p + sigma * p), 5),
            expected: round_to(current * (1.0 + mu * p), 5),
            bearish: round_to(current * (1.0 + mu * p - sigma * p), 5),
        },
        expected_change_pct: round_to(mu * p * 100.0, 2),
        volatility_index: round_to(sigma * 100.0, 2),
        disclaimer: FORECAST_DISCLAIMER.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub total_signals: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    pub strategy: String,
    pub short_period: usize,
    pub long_period: usize,
    pub disclaimer: String,
}

pub fn backtest_signal(prices: &[f64]) -> Result<BacktestReport, AnalysisError> {
    let h = &ANALYSIS.heuristics;
    backtest_signal_with(prices, h.backtest_short_period, h.backtest_long_period)
}

/// Counts MA-crossover actions: BUY when the short MA is above the long MA while flat,
/// SELL when below while long, HOLD otherwise.
pub fn backtest_signal_with(
    prices: &[f64],
    short_period: usize,
    long_period: usize,
) -> Result<BacktestReport, AnalysisError> {
    AnalysisError::require(long_period, prices.len())?;

    let short_ma = sma(prices, short_period);
    let long_ma = sma(prices, long_period);

    let (mut buys, mut sells, mut holds) = (0, 0, 0);
    let mut in_position = false;

    for i in long_period..prices.len() {
        if short_ma[i] > long_ma[i] && !in_position {
            buys += 1;
            in_position = true;
        } else if short_ma[i] < long_ma[i] && in_position {
            sells += 1;
            in_position = false;
        } else {
            holds += 1;
        }
    }

    Ok(BacktestReport {
        total_signals: buys + sells + holds,
        buy_signals: buys,
        sell_signals: sells,
        hold_signals: holds,
        strategy: BACKTEST_STRATEGY.to_string(),
        short_period,
        long_period,
        disclaimer: BACKTEST_DISCLAIMER.to_string(),
    })
}
