// Signal classification, heuristics and the multi-pair aggregator
pub mod ai_analyzer;
pub mod forecast;
pub mod multi_pair_monitor;
pub mod notifier;
pub mod pair_analysis;
pub mod patterns;
pub mod sentiment;
pub mod signal_classifier;
pub mod support_resistance;
pub mod trend_prediction;

// Re-export commonly used types
pub use ai_analyzer::{AIAnalysisResult, AiAnalyzer, RiskLevel};
pub use forecast::{
    BacktestReport, ForecastReport, HeuristicOutcome, backtest_signal, backtest_signal_with,
    forecast, forecast_with,
};
pub use multi_pair_monitor::{DailySummary, MultiPairMonitor, filter_opportunities};
pub use notifier::NotificationLedger;
pub use pair_analysis::PairAnalyzer;
pub use patterns::{
    ChartPattern, ConfidenceSource, DetectionMethod, FixedConfidence, PatternRecognizer,
    RandomConfidence,
};
pub use sentiment::{SentimentLabel, SentimentReport, score_headlines};
pub use signal_classifier::SignalClassifier;
pub use support_resistance::{SupportResistance, support_resistance};
pub use trend_prediction::{TrendPrediction, predict_trend};
