use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use fx_scout::config::{DEFAULT_PAIRS, SERIES_CACHE_VERSION};
use fx_scout::data::{CacheFile, SampleFeed};
use fx_scout::models::SeriesCollection;
use fx_scout::utils::TimeUtils;
use fx_scout::CurrencyPair;

/// Writes a bincode cache of generated sample history that `fx-scout --cache` can read.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "1h")]
    interval: String,

    #[arg(long, default_value_t = 250)]
    periods: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Defaults to fx_cache/series_<interval>_v<version>.bin
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    build_sample_cache(Args::parse())
}

fn build_sample_cache(args: Args) -> Result<()> {
    let interval_ms = TimeUtils::interval_from_string(&args.interval)
        .with_context(|| format!("Unsupported interval '{}'", args.interval))?;

    let feed = SampleFeed::seeded(args.seed);
    let series_data = DEFAULT_PAIRS
        .iter()
        .map(|name| feed.generate(&CurrencyPair::new(*name), interval_ms, args.periods))
        .collect::<Result<Vec<_>>>()?;

    let collection = SeriesCollection {
        name: format!("Sample FX Collection (seed {})", args.seed),
        version: SERIES_CACHE_VERSION,
        series_data,
    };
    let cache = CacheFile::new(interval_ms, collection, SERIES_CACHE_VERSION);

    let output_path = args
        .output
        .unwrap_or_else(|| CacheFile::default_cache_path(interval_ms));
    cache.save_to_path(&output_path)?;

    println!(
        "✅ Sample cache written to {:?} with {} pairs x {} periods.",
        output_path,
        cache.data.series_data.len(),
        args.periods
    );
    Ok(())
}
