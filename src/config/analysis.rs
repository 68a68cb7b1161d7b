//! Analysis and computation configuration

/// Periods and weights used by the technical signal classifier
pub struct ClassifierSettings {
    pub sma_short: usize,
    pub sma_medium: usize,
    // Only computed once the series is longer than this
    pub sma_long: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,

    // Score contributions
    pub rsi_weight: i32,
    pub macd_weight: i32,
    pub ema_weight: i32,
    pub bollinger_weight: i32,
    // |score| must exceed this to leave HOLD
    pub signal_threshold: i32,
    pub max_confidence: f64,
    pub hold_confidence: f64,
}

/// Vote weights for the per-pair trading signal built by the aggregator
pub struct TradingSignalSettings {
    pub rsi_weight: f64,
    pub ma_weight: f64,
    pub macd_weight: f64,
    pub histogram_weight: f64,
    pub score_threshold: f64,
    pub base_confidence: f64,
    pub confidence_per_point: f64,
    pub max_confidence: f64,
    pub hold_confidence: f64,
    pub atr_period: usize,
    // Stop and target distances in ATR multiples
    pub stop_loss_atr: f64,
    pub take_profit_atr: f64,
}

/// Constants for the naive pattern / forecasting heuristics
pub struct HeuristicSettings {
    pub extrema_window: usize,
    pub extrema_levels: usize,
    pub pivot_lookback: usize,
    pub prediction_periods: usize,
    pub momentum_lookback: usize,
    pub volatility_lookback: usize,
    // Momentum (in %) beyond which a trend is called
    pub trend_momentum_pct: f64,
    pub prediction_max_confidence: f64,
    pub forecast_min_periods: usize,
    pub forecast_lookback: usize,
    pub forecast_periods: usize,
    pub backtest_short_period: usize,
    pub backtest_long_period: usize,
    pub pattern_confidence_min: f64,
    pub pattern_confidence_max: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub classifier: ClassifierSettings,
    pub trading_signal: TradingSignalSettings,
    pub heuristics: HeuristicSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    classifier: ClassifierSettings {
        sma_short: 20,
        sma_medium: 50,
        sma_long: 200,
        ema_fast: 12,
        ema_slow: 26,
        rsi_period: 14,
        rsi_oversold: 30.0,
        rsi_overbought: 70.0,
        macd_fast: 12,
        macd_slow: 26,
        macd_signal: 9,
        bollinger_period: 20,
        bollinger_std_dev: 2.0,

        rsi_weight: 30,
        macd_weight: 20,
        ema_weight: 20,
        bollinger_weight: 15,
        signal_threshold: 40,
        max_confidence: 95.0,
        hold_confidence: 50.0,
    },

    trading_signal: TradingSignalSettings {
        rsi_weight: 2.0,
        ma_weight: 1.0,
        macd_weight: 1.0,
        histogram_weight: 0.5,
        score_threshold: 4.0,
        base_confidence: 60.0,
        confidence_per_point: 5.0,
        max_confidence: 90.0,
        hold_confidence: 50.0,
        atr_period: 14,
        stop_loss_atr: 2.0,
        take_profit_atr: 3.0,
    },

    heuristics: HeuristicSettings {
        extrema_window: 5,
        extrema_levels: 3,
        pivot_lookback: 20,
        prediction_periods: 10,
        momentum_lookback: 10,
        volatility_lookback: 20,
        trend_momentum_pct: 2.0,
        prediction_max_confidence: 75.0,
        forecast_min_periods: 14,
        forecast_lookback: 14,
        forecast_periods: 7,
        backtest_short_period: 5,
        backtest_long_period: 20,
        pattern_confidence_min: 60.0,
        pattern_confidence_max: 85.0,
    },
};
