//! Configuration module for the analysis core and the monitor binary.

pub mod analysis;
pub mod monitor;
pub mod persistence;

mod debug; // Private: callers use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, ClassifierSettings, HeuristicSettings, TradingSignalSettings,
};
pub use monitor::{DEFAULT_PAIRS, MonitorConfig};
pub use persistence::{
    CACHE_PATH, SERIES_CACHE_VERSION, SERIES_FILENAME_WITHOUT_EXT, series_cache_filename,
};
