use std::collections::HashMap;
use std::time::Duration;
#[cfg(debug_assertions)]
use std::time::Instant;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::pair_analysis::PairAnalyzer;
use crate::config::MonitorConfig;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::data::PriceFeed;
use crate::domain::CurrencyPair;
use crate::error::AnalysisError;
use crate::models::{DISCLAIMER, Signal, TradingSignal};

/// Snapshot of one scan cycle's opportunities.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub timestamp: DateTime<Utc>,
    pub pairs_checked: usize,
    pub total_signals: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub top_opportunity: Option<TradingSignal>,
    pub pairs: Vec<String>,
}

impl DailySummary {
    /// `opportunities` must already be filtered and sorted.
    pub fn from_opportunities(
        pairs_checked: usize,
        opportunities: &[TradingSignal],
        timestamp: DateTime<Utc>,
    ) -> Self {
        let count = |kind: Signal| {
            opportunities
                .iter()
                .filter(|s| s.signal_type == kind)
                .count()
        };
        Self {
            timestamp,
            pairs_checked,
            total_signals: opportunities.len(),
            buy_signals: count(Signal::Buy),
            sell_signals: count(Signal::Sell),
            top_opportunity: opportunities.first().cloned(),
            pairs: opportunities.iter().map(|s| s.pair.to_string()).collect(),
        }
    }

    pub fn report(&self) -> String {
        let top = match &self.top_opportunity {
            Some(signal) => signal.alert_message(),
            None => "_No high-confidence signals today_".to_string(),
        };
        format!(
            "📊 **Forex Daily Report**\n\
             ⏰ {}\n\
             \n\
             📈 **Summary:**\n\
             • Pairs Checked: {}\n\
             • Total Signals: {}\n\
             • 🟢 Buy Signals: {}\n\
             • 🔴 Sell Signals: {}\n\
             \n\
             🎯 **Top Opportunity:**\n\
             {}\n\
             \n\
             {}",
            self.timestamp.to_rfc3339(),
            self.pairs_checked,
            self.total_signals,
            self.buy_signals,
            self.sell_signals,
            top,
            DISCLAIMER
        )
    }
}

/// Keeps actionable signals at or above `min_confidence`, highest confidence first.
pub fn filter_opportunities(signals: Vec<TradingSignal>, min_confidence: f64) -> Vec<TradingSignal> {
    let mut opportunities: Vec<TradingSignal> = signals
        .into_iter()
        .filter(|s| s.signal_type.is_actionable() && s.confidence >= min_confidence)
        .collect();
    opportunities.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    opportunities
}

/// Runs the pair analyzer over every configured pair.
/// A pair that fails is logged and skipped; the batch always completes.
pub struct MultiPairMonitor<F: PriceFeed> {
    feed: F,
    config: MonitorConfig,
    analyzer: PairAnalyzer,
    last_check: HashMap<String, DateTime<Utc>>,
}

impl<F: PriceFeed> MultiPairMonitor<F> {
    pub fn new(feed: F, config: MonitorConfig) -> Self {
        Self {
            feed,
            config,
            analyzer: PairAnalyzer::default(),
            last_check: HashMap::new(),
        }
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn pairs(&self) -> Vec<CurrencyPair> {
        self.config
            .pairs
            .iter()
            .map(|name| CurrencyPair::from(name.as_str()))
            .collect()
    }

    pub fn pair_count(&self) -> usize {
        self.config.pairs.len()
    }

    pub fn last_check(&self, pair: &str) -> Option<DateTime<Utc>> {
        self.last_check.get(pair).copied()
    }

    /// Fetch history for one pair and build its signal.
    pub fn analyze_pair(&self, pair: &CurrencyPair) -> Result<TradingSignal> {
        let interval_ms = self
            .config
            .interval_ms()
            .ok_or_else(|| anyhow!("Unsupported interval '{}'", self.config.interval))?;
        let series = self
            .feed
            .history(pair, interval_ms, self.config.history_periods)?
            .ok_or_else(|| AnalysisError::NoData {
                pair: pair.to_string(),
            })?;
        Ok(self.analyzer.analyze_pair(&series)?)
    }

    pub fn check_all_pairs(&mut self) -> Vec<TradingSignal> {
        #[cfg(debug_assertions)]
        let started = Instant::now();

        let pairs = self.pairs();
        let this = &*self;
        let results: Vec<(CurrencyPair, Result<TradingSignal>)> = if this.config.parallel {
            pairs
                .par_iter()
                .map(|pair| (pair.clone(), this.analyze_pair(pair)))
                .collect()
        } else {
            let delay = Duration::from_millis(this.config.request_delay_ms);
            pairs
                .iter()
                .enumerate()
                .map(|(i, pair)| {
                    if i > 0 && !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    (pair.clone(), this.analyze_pair(pair))
                })
                .collect()
        };

        let mut signals = Vec::with_capacity(results.len());
        for (pair, result) in results {
            match result {
                Ok(signal) => {
                    self.last_check.insert(pair.to_string(), Utc::now());
                    signals.push(signal);
                }
                Err(e) => match e.downcast_ref::<AnalysisError>() {
                    Some(AnalysisError::NoData { .. }) => {
                        log::warn!("No data available for {}", pair)
                    }
                    _ => log::error!("Error analyzing {}: {:#}", pair, e),
                },
            }
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_scan_timings {
            log::info!(
                "Scanned {} pairs in {:.2?} ({} signals)",
                pairs.len(),
                started.elapsed(),
                signals.len()
            );
        }

        signals
    }

    pub fn get_opportunities(&mut self, min_confidence: f64) -> Vec<TradingSignal> {
        filter_opportunities(self.check_all_pairs(), min_confidence)
    }

    /// Runs a scan at the configured minimum confidence and summarises it.
    pub fn daily_summary(&mut self) -> DailySummary {
        let opportunities = self.get_opportunities(self.config.min_confidence);
        DailySummary::from_opportunities(self.pair_count(), &opportunities, Utc::now())
    }

    pub fn generate_report(&mut self) -> String {
        self.daily_summary().report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feed::{CollectionFeed, SampleFeed};
    use crate::models::{PriceSeries, SeriesCollection};
    use crate::models::timeseries::series_from_closes;
    use crate::models::trading_signal::signal_with_confidence;

    fn spike_and_creep() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..100).map(|i| 1.5 - 0.002 * i as f64).collect();
        let base = closes[99];
        closes.extend([base + 0.1, base + 0.2, base + 0.1, base]);
        closes.extend((0..14).map(|j| base + 0.0001 * (j + 1) as f64));
        closes
    }

    /// Fails outright for one pair and serves the fixture series otherwise.
    struct FlakyFeed {
        inner: CollectionFeed,
        broken: &'static str,
    }

    impl PriceFeed for FlakyFeed {
        fn history(
            &self,
            pair: &CurrencyPair,
            interval_ms: i64,
            periods: usize,
        ) -> Result<Option<PriceSeries>> {
            if pair.name() == self.broken {
                return Err(anyhow!("connection refused"));
            }
            self.inner.history(pair, interval_ms, periods)
        }

        fn signature(&self) -> &'static str {
            "Flaky"
        }
    }

    fn fixture_collection() -> SeriesCollection {
        let rising: Vec<f64> = (0..120).map(|i| 1.002f64.powi(i)).collect();
        SeriesCollection {
            name: "fixture".to_string(),
            version: 1.0,
            series_data: vec![
                series_from_closes("EUR/USD", &spike_and_creep()),
                series_from_closes("GBP/USD", &rising),
            ],
        }
    }

    fn fixture_monitor(parallel: bool) -> MultiPairMonitor<CollectionFeed> {
        let config = MonitorConfig {
            pairs: vec!["EUR/USD".into(), "GBP/USD".into(), "USD/IDR".into()],
            history_periods: 200,
            parallel,
            ..Default::default()
        };
        MultiPairMonitor::new(CollectionFeed::new(fixture_collection()), config)
    }

    #[test]
    fn test_filter_keeps_high_confidence_in_descending_order() {
        let signals = vec![
            signal_with_confidence("EUR/USD", Signal::Buy, 55.0),
            signal_with_confidence("GBP/USD", Signal::Buy, 91.0),
            signal_with_confidence("USD/JPY", Signal::Sell, 78.0),
        ];
        let confidences: Vec<f64> = filter_opportunities(signals, 70.0)
            .iter()
            .map(|s| s.confidence)
            .collect();
        assert_eq!(confidences, vec![91.0, 78.0]);
    }

    #[test]
    fn test_filter_drops_hold() {
        let signals = vec![
            signal_with_confidence("EUR/USD", Signal::Hold, 95.0),
            signal_with_confidence("GBP/USD", Signal::Sell, 70.0),
        ];
        let kept = filter_opportunities(signals, 70.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pair.name(), "GBP/USD");
    }

    #[test]
    fn test_missing_pair_is_skipped_not_fatal() {
        let mut monitor = fixture_monitor(false);
        let signals = monitor.check_all_pairs();

        assert_eq!(signals.len(), 2);
        assert!(monitor.last_check("EUR/USD").is_some());
        assert!(monitor.last_check("GBP/USD").is_some());
        assert!(monitor.last_check("USD/IDR").is_none());
    }

    #[test]
    fn test_feed_error_is_skipped_not_fatal() {
        for parallel in [false, true] {
            let feed = FlakyFeed {
                inner: CollectionFeed::new(fixture_collection()),
                broken: "GBP/USD",
            };
            let config = MonitorConfig {
                pairs: vec!["GBP/USD".into(), "EUR/USD".into()],
                history_periods: 200,
                parallel,
                ..Default::default()
            };
            let mut monitor = MultiPairMonitor::new(feed, config);
            let signals = monitor.check_all_pairs();

            assert_eq!(signals.len(), 1);
            assert_eq!(signals[0].pair.name(), "EUR/USD");
            assert!(monitor.last_check("GBP/USD").is_none());
        }
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let sequential = fixture_monitor(false).get_opportunities(70.0);
        let parallel = fixture_monitor(true).get_opportunities(70.0);

        assert_eq!(sequential.len(), 1);
        assert_eq!(sequential[0].pair.name(), "EUR/USD");
        assert_eq!(sequential[0].signal_type, Signal::Sell);
        assert_eq!(parallel.len(), sequential.len());
        assert_eq!(parallel[0].confidence, sequential[0].confidence);
    }

    #[test]
    fn test_daily_summary_and_report() {
        let mut monitor = fixture_monitor(false);
        let summary = monitor.daily_summary();
        assert_eq!(summary.pairs_checked, 3);
        assert_eq!(summary.total_signals, 1);
        assert_eq!(summary.sell_signals, 1);
        assert_eq!(summary.buy_signals, 0);
        assert_eq!(summary.pairs, vec!["EUR/USD"]);

        let report = summary.report();
        assert!(report.starts_with("📊 **Forex Daily Report**"));
        assert!(report.contains("• Pairs Checked: 3"));
        assert!(report.contains("**EUR/USD SELL SIGNAL**"));
        assert!(report.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_empty_report_says_so() {
        let summary = DailySummary::from_opportunities(4, &[], Utc::now());
        assert!(summary.top_opportunity.is_none());
        assert!(summary.report().contains("_No high-confidence signals today_"));
    }

    #[test]
    fn test_sample_feed_scan_covers_every_pair() {
        let config = MonitorConfig {
            parallel: true,
            ..Default::default()
        };
        let mut monitor = MultiPairMonitor::new(SampleFeed::seeded(9), config);
        let signals = monitor.check_all_pairs();
        assert_eq!(signals.len(), 8);
        assert!(signals.iter().all(|s| (0.0..=100.0).contains(&s.confidence)));
    }
}
