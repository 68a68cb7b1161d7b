//! Runtime configuration for the multi-pair signal monitor

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::CurrencyPair;
use crate::error::AnalysisError;
use crate::utils::TimeUtils;

/// Majors watched when no pair list is configured.
pub const DEFAULT_PAIRS: &[&str] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD", "EUR/GBP", "USD/IDR",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub pairs: Vec<String>,
    /// Candle interval requested from the feed, e.g. "1h"
    pub interval: String,
    /// Periods of history fetched per pair
    pub history_periods: usize,
    /// Signals below this confidence are not opportunities
    pub min_confidence: f64,
    /// Minutes between scan cycles in watch mode
    pub check_interval_minutes: u64,
    /// Pause between sequential fetches (politeness towards rate-limited APIs)
    pub request_delay_ms: u64,
    /// Analyse pairs on the rayon pool instead of one after another
    pub parallel: bool,
    /// Window during which a repeat alert for the same pair and direction is suppressed
    pub notification_window_hours: i64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
            interval: "1h".to_string(),
            history_periods: 50,
            min_confidence: 70.0,
            check_interval_minutes: 15,
            request_delay_ms: 0,
            parallel: false,
            notification_window_hours: 24,
        }
    }
}

impl MonitorConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: MonitorConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(unknown) = self
            .pairs
            .iter()
            .find(|name| !CurrencyPair::from(name.as_str()).is_known())
        {
            return Err(AnalysisError::UnknownPair(unknown.clone()).into());
        }
        if self.interval_ms().is_none() {
            bail!("Unsupported interval '{}'", self.interval);
        }
        if self.history_periods == 0 {
            bail!("history_periods must be positive");
        }
        if self.check_interval_minutes == 0 {
            bail!("check_interval_minutes must be positive");
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            bail!("min_confidence must be within 0-100, got {}", self.min_confidence);
        }
        Ok(())
    }

    pub fn interval_ms(&self) -> Option<i64> {
        TimeUtils::interval_from_string(&self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"pairs": ["EUR/USD"], "min_confidence": 75}"#).unwrap();
        assert_eq!(config.pairs, vec!["EUR/USD"]);
        assert_eq!(config.min_confidence, 75.0);
        assert_eq!(config.history_periods, 50);
        assert_eq!(config.interval_ms(), Some(TimeUtils::MS_IN_H));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = MonitorConfig {
            interval: "7h".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            min_confidence: 120.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_pairs_are_rejected() {
        for pairs in [vec!["FOO/BAR"], vec!["EUR/USD", "EURUSD"]] {
            let config = MonitorConfig {
                pairs: pairs.iter().map(|p| p.to_string()).collect(),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<AnalysisError>(),
                Some(AnalysisError::UnknownPair(_))
            ));
        }
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("fx_scout_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"interval": "4h", "parallel": true}"#).unwrap();
        let config = MonitorConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.parallel);
        assert_eq!(config.pairs.len(), DEFAULT_PAIRS.len());
        assert_eq!(config.interval_ms(), Some(TimeUtils::MS_IN_4_H));
    }
}
