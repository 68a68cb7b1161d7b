// Domain models for the analysis core
// These modules contain pure data types independent of any presentation layer

pub mod analysis_result;
pub mod indicator_set;
pub mod timeseries;
pub mod trading_signal;

// Re-export key types for convenience
pub use analysis_result::{AnalysisResult, Signal, Trend};
pub use indicator_set::{IndicatorSet, IndicatorValue};
pub use timeseries::{PriceSeries, SeriesCollection};
pub use trading_signal::{DISCLAIMER, TradingSignal};
