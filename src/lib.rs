#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AiAnalyzer, MultiPairMonitor, NotificationLedger, PairAnalyzer, SignalClassifier};
pub use config::MonitorConfig;
pub use data::{CacheFile, CollectionFeed, FallbackFeed, PriceFeed, SampleFeed};
pub use domain::{Candle, CurrencyPair};
pub use error::AnalysisError;
pub use models::{AnalysisResult, IndicatorSet, PriceSeries, Signal, TradingSignal, Trend};

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON monitor configuration; defaults apply to anything it omits
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bincode series cache to read before falling back to generated sample data
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Comma-separated pairs, e.g. EUR/USD,USD/JPY
    #[arg(long, value_delimiter = ',')]
    pub pairs: Vec<String>,

    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Print opportunities as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the daily report after the scan
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Run the heuristic AI read-out on the first configured pair
    #[arg(long, default_value_t = false)]
    pub ai: bool,

    /// Seed for sample data and pattern confidence
    #[arg(long)]
    pub seed: Option<u64>,

    /// News headline fed to sentiment scoring (repeatable)
    #[arg(long = "headline")]
    pub headlines: Vec<String>,

    /// Keep scanning every `check_interval_minutes`
    #[arg(long, default_value_t = false)]
    pub watch: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn monitor_config(&self) -> anyhow::Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::load_from_path(path)?,
            None => MonitorConfig::default(),
        };
        if !self.pairs.is_empty() {
            config.pairs = self.pairs.iter().map(|p| p.trim().to_uppercase()).collect();
        }
        if let Some(min_confidence) = self.min_confidence {
            config.min_confidence = min_confidence;
        }
        config.validate()?;
        Ok(config)
    }
}
