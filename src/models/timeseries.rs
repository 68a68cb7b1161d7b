use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{Candle, CurrencyPair};
use crate::error::AnalysisError;

// ============================================================================
// PriceSeries: Raw OHLCV data for a currency pair, oldest first
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub pair: CurrencyPair,
    pub interval_ms: i64,

    pub timestamps_ms: Vec<i64>,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    pub volumes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from candles, enforcing strictly ascending timestamps.
    pub fn from_candles(
        pair: CurrencyPair,
        interval_ms: i64,
        candles: &[Candle],
    ) -> Result<Self, AnalysisError> {
        if let Some(pos) = candles
            .windows(2)
            .position(|w| w[1].timestamp_ms <= w[0].timestamp_ms)
        {
            return Err(AnalysisError::InvalidSeries(format!(
                "{}: timestamp at index {} is not after its predecessor",
                pair,
                pos + 1
            )));
        }
        if let Some(pos) = candles.iter().position(|c| !c.is_well_formed()) {
            return Err(AnalysisError::InvalidSeries(format!(
                "{}: malformed candle at index {}",
                pair, pos
            )));
        }

        Ok(Self {
            pair,
            interval_ms,
            timestamps_ms: candles.iter().map(|c| c.timestamp_ms).collect(),
            open_prices: candles.iter().map(|c| c.open_price).collect(),
            high_prices: candles.iter().map(|c| c.high_price).collect(),
            low_prices: candles.iter().map(|c| c.low_price).collect(),
            close_prices: candles.iter().map(|c| c.close_price).collect(),
            volumes: candles.iter().map(|c| c.volume).collect(),
        })
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.timestamps_ms[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn len(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.close_prices
    }

    pub fn last_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }

    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.timestamps_ms.last().copied()
    }

    /// The most recent `periods` records (or all of them if fewer exist).
    pub fn most_recent(&self, periods: usize) -> PriceSeries {
        let start = self.len().saturating_sub(periods);
        PriceSeries {
            pair: self.pair.clone(),
            interval_ms: self.interval_ms,
            timestamps_ms: self.timestamps_ms[start..].to_vec(),
            open_prices: self.open_prices[start..].to_vec(),
            high_prices: self.high_prices[start..].to_vec(),
            low_prices: self.low_prices[start..].to_vec(),
            close_prices: self.close_prices[start..].to_vec(),
            volumes: self.volumes[start..].to_vec(),
        }
    }
}

// ============================================================================
// SeriesCollection: every series one data source produced
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SeriesCollection {
    pub name: String, // Metadata e.g. "Sample FX Collection".
    pub version: f64,
    pub series_data: Vec<PriceSeries>,
}

impl SeriesCollection {
    pub fn unique_pair_names(&self) -> Vec<String> {
        // BTreeSet maintains sorted order and ensures uniqueness
        self.series_data
            .iter()
            .map(|ts| ts.pair.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn find_matching_series(&self, pair: &CurrencyPair, interval_ms: i64) -> Option<&PriceSeries> {
        self.series_data
            .iter()
            .find(|series| &series.pair == pair && series.interval_ms == interval_ms)
    }
}

#[cfg(test)]
pub(crate) fn series_from_closes(pair: &str, closes: &[f64]) -> PriceSeries {
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(i as i64 * 3_600_000, c, c * 1.001, c * 0.999, c, 1000.0))
        .collect();
    PriceSeries::from_candles(CurrencyPair::new(pair), 3_600_000, &candles)
        .expect("test candles are well formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_timestamps_rejected() {
        let candles = vec![
            Candle::new(0, 1.0, 1.1, 0.9, 1.0, 1.0),
            Candle::new(0, 1.0, 1.1, 0.9, 1.0, 1.0),
        ];
        let err = PriceSeries::from_candles(CurrencyPair::new("EUR/USD"), 60_000, &candles);
        assert!(matches!(err, Err(AnalysisError::InvalidSeries(_))));
    }

    #[test]
    fn test_most_recent_keeps_alignment() {
        let series = series_from_closes("EUR/USD", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let tail = series.most_recent(2);
        assert_eq!(tail.closes(), &[4.0, 5.0]);
        assert_eq!(tail.timestamps_ms, vec![3 * 3_600_000, 4 * 3_600_000]);
        assert_eq!(series.most_recent(50).len(), 5);
        assert_eq!(tail.get_candle(1).close_price, 5.0);
    }

    #[test]
    fn test_collection_lookup() {
        let collection = SeriesCollection {
            name: "test".into(),
            version: 1.0,
            series_data: vec![
                series_from_closes("USD/JPY", &[150.0]),
                series_from_closes("EUR/USD", &[1.08]),
                series_from_closes("EUR/USD", &[1.09]),
            ],
        };
        assert_eq!(collection.unique_pair_names(), vec!["EUR/USD", "USD/JPY"]);
        let found = collection
            .find_matching_series(&CurrencyPair::new("USD/JPY"), 3_600_000)
            .unwrap();
        assert_eq!(found.last_close(), Some(150.0));
        assert!(collection
            .find_matching_series(&CurrencyPair::new("USD/JPY"), 60_000)
            .is_none());
    }
}
