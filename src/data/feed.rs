use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::Utc;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::data::cache_file::CacheFile;
use crate::domain::{Candle, CurrencyPair};
use crate::models::{PriceSeries, SeriesCollection};

/// Source of OHLC history. `Ok(None)` means the source has nothing for the pair,
/// `Err` means the source itself failed.
pub trait PriceFeed: Send + Sync {
    fn history(
        &self,
        pair: &CurrencyPair,
        interval_ms: i64,
        periods: usize,
    ) -> Result<Option<PriceSeries>>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Reference rate used to anchor generated history.
pub fn sample_base_rate(pair: &CurrencyPair) -> f64 {
    match pair.name() {
        "EUR/USD" => 1.0850,
        "GBP/USD" => 1.2650,
        "USD/JPY" => 150.50,
        "USD/CHF" => 0.8850,
        "AUD/USD" => 0.6520,
        "USD/CAD" => 1.3650,
        "USD/IDR" => 15600.0,
        "USD/SGD" => 1.3450,
        "EUR/GBP" => 0.8580,
        "EUR/JPY" => 163.5,
        "GBP/JPY" => 190.5,
        _ => 1.0,
    }
}

/// Random-walk history for offline use: daily-ish returns ~ N(0, 1%),
/// highs and lows offset by |N(0, 0.5%)|.
pub struct SampleFeed {
    seed: Option<u64>,
    end_ms: i64,
}

impl SampleFeed {
    /// Fresh randomness on every request, ending now.
    pub fn new() -> Self {
        Self {
            seed: None,
            end_ms: Utc::now().timestamp_millis(),
        }
    }

    /// Same pair and seed always produce the same history.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            end_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn ending_at(mut self, end_ms: i64) -> Self {
        self.end_ms = end_ms;
        self
    }

    fn rng_for(&self, pair: &CurrencyPair) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mixed = pair
                    .name()
                    .bytes()
                    .fold(seed, |h, b| h.wrapping_mul(31).wrapping_add(b as u64));
                StdRng::seed_from_u64(mixed)
            }
            None => StdRng::from_entropy(),
        }
    }

    pub fn generate(
        &self,
        pair: &CurrencyPair,
        interval_ms: i64,
        periods: usize,
    ) -> Result<PriceSeries> {
        let mut rng = self.rng_for(pair);
        let returns = Normal::new(0.0, 0.01).map_err(|e| anyhow!("{e}"))?;
        let spread = Normal::new(0.0, 0.005).map_err(|e| anyhow!("{e}"))?;

        let base = sample_base_rate(pair) * (1.0 + rng.gen_range(-0.005..=0.005));
        let start_ms = self.end_ms - interval_ms * periods.saturating_sub(1) as i64;

        let mut price = base;
        let mut candles = Vec::with_capacity(periods);
        for i in 0..periods {
            price *= 1.0 + returns.sample(&mut rng);
            let high = price * (1.0 + spread.sample(&mut rng).abs());
            let low = price * (1.0 - spread.sample(&mut rng).abs());
            let volume = rng.gen_range(1000..10000) as f64;
            candles.push(Candle::new(
                start_ms + i as i64 * interval_ms,
                price,
                high,
                low,
                price,
                volume,
            ));
        }

        Ok(PriceSeries::from_candles(pair.clone(), interval_ms, &candles)?)
    }
}

impl Default for SampleFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceFeed for SampleFeed {
    fn history(
        &self,
        pair: &CurrencyPair,
        interval_ms: i64,
        periods: usize,
    ) -> Result<Option<PriceSeries>> {
        if periods == 0 {
            return Ok(None);
        }
        self.generate(pair, interval_ms, periods).map(Some)
    }

    fn signature(&self) -> &'static str {
        "Sample Random Walk"
    }
}

/// Serves the most recent periods from an in-memory collection.
pub struct CollectionFeed {
    collection: SeriesCollection,
}

impl CollectionFeed {
    pub fn new(collection: SeriesCollection) -> Self {
        Self { collection }
    }

    pub fn from_cache_file(path: &Path) -> Result<Self> {
        let cache = CacheFile::load_from_path(path)?;
        log::info!(
            "Loaded '{}' ({} series) from {:?}",
            cache.data.name,
            cache.data.series_data.len(),
            path
        );
        Ok(Self::new(cache.data))
    }

    pub fn collection(&self) -> &SeriesCollection {
        &self.collection
    }
}

impl PriceFeed for CollectionFeed {
    fn history(
        &self,
        pair: &CurrencyPair,
        interval_ms: i64,
        periods: usize,
    ) -> Result<Option<PriceSeries>> {
        Ok(self
            .collection
            .find_matching_series(pair, interval_ms)
            .map(|series| series.most_recent(periods))
            .filter(|series| !series.is_empty()))
    }

    fn signature(&self) -> &'static str {
        "Cached Series Collection"
    }
}

/// Asks each feed in turn; the first one with data wins.
pub struct FallbackFeed {
    feeds: Vec<Box<dyn PriceFeed>>,
}

impl FallbackFeed {
    pub fn new(feeds: Vec<Box<dyn PriceFeed>>) -> Self {
        Self { feeds }
    }
}

impl PriceFeed for FallbackFeed {
    fn history(
        &self,
        pair: &CurrencyPair,
        interval_ms: i64,
        periods: usize,
    ) -> Result<Option<PriceSeries>> {
        for feed in &self.feeds {
            match feed.history(pair, interval_ms, periods) {
                Ok(Some(series)) => return Ok(Some(series)),
                Ok(None) => continue,
                Err(e) => {
                    log::info!("Error with feed {}: {}", feed.signature(), e);
                    // Continue to the next implementation
                }
            }
        }
        Ok(None)
    }

    fn signature(&self) -> &'static str {
        "Fallback Chain"
    }
}
