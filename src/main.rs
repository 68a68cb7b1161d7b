use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use fx_scout::analysis::multi_pair_monitor::DailySummary;
use fx_scout::analysis::patterns::{PatternRecognizer, RandomConfidence};
use fx_scout::analysis::{
    BacktestReport, ForecastReport, HeuristicOutcome, backtest_signal, filter_opportunities, forecast,
};
use fx_scout::{
    AiAnalyzer, Cli, CollectionFeed, CurrencyPair, FallbackFeed, MonitorConfig, MultiPairMonitor,
    NotificationLedger, PriceFeed, SampleFeed, TradingSignal,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // Shared by the scan and the AI read-out
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Sample data seed: {}", seed);

    let config = args.monitor_config()?;
    let interval_minutes = config.check_interval_minutes;
    let mut ledger = NotificationLedger::new(config.notification_window_hours);
    let mut monitor = MultiPairMonitor::new(build_feed(&args, seed)?, config);

    log::info!(
        "Monitoring {} pairs (min confidence {}%)",
        monitor.pair_count(),
        monitor.config().min_confidence
    );

    loop {
        run_cycle(&mut monitor, &mut ledger, &args, seed)?;
        if !args.watch {
            break;
        }
        std::thread::sleep(Duration::from_secs(interval_minutes * 60));
    }
    Ok(())
}

/// Cached series first (if a cache was given), generated sample data otherwise.
fn build_feed(args: &Cli, seed: u64) -> Result<FallbackFeed> {
    let mut feeds: Vec<Box<dyn PriceFeed>> = Vec::new();
    if let Some(path) = &args.cache {
        feeds.push(Box::new(CollectionFeed::from_cache_file(path)?));
    }
    feeds.push(Box::new(SampleFeed::seeded(seed)));
    Ok(FallbackFeed::new(feeds))
}

fn run_cycle(
    monitor: &mut MultiPairMonitor<FallbackFeed>,
    ledger: &mut NotificationLedger,
    args: &Cli,
    seed: u64,
) -> Result<()> {
    let signals = monitor.check_all_pairs();
    let mut opportunities = filter_opportunities(signals, monitor.config().min_confidence);
    let alerts = ledger.check_and_notify(&mut opportunities);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&opportunities)?);
    } else {
        print_opportunities(&opportunities);
        for alert in &alerts {
            println!("\n{}", alert);
        }
    }

    if args.report {
        let summary = DailySummary::from_opportunities(
            monitor.pair_count(),
            &opportunities,
            chrono::Utc::now(),
        );
        println!("\n{}", "=".repeat(50));
        println!("{}", summary.report());
    }

    if args.ai {
        if let Some(pair) = monitor.pairs().first() {
            print_ai_analysis(monitor, pair, args, seed)?;
        }
    }
    Ok(())
}

fn print_opportunities(opportunities: &[TradingSignal]) {
    println!("\n📊 Found {} opportunities:", opportunities.len());
    for signal in opportunities.iter().take(5) {
        println!("\n{}", "-".repeat(40));
        println!(
            "📌 {} - {}",
            signal.pair,
            signal.signal_type.to_string().to_uppercase()
        );
        println!("   Confidence: {:.0}%", signal.confidence);
        println!("   Entry: {:.5}", signal.entry_price);
        println!("   Stop: {:.5}", signal.stop_loss);
        println!("   Target: {:.5}", signal.take_profit);
        println!("   R/R: {:.2}", signal.risk_reward_ratio());
    }
}

fn print_ai_analysis(
    monitor: &MultiPairMonitor<FallbackFeed>,
    pair: &CurrencyPair,
    args: &Cli,
    seed: u64,
) -> Result<()> {
    let config: &MonitorConfig = monitor.config();
    let Some(interval_ms) = config.interval_ms() else {
        return Ok(());
    };
    let Some(series) = monitor
        .feed()
        .history(pair, interval_ms, config.history_periods)?
    else {
        log::warn!("No data available for {}", pair);
        return Ok(());
    };

    let confidence = RandomConfidence::seeded(seed);
    let mut analyzer = AiAnalyzer::new(PatternRecognizer::new(Box::new(confidence)));
    let result = analyzer.comprehensive_analysis(pair.name(), series.closes(), &args.headlines)?;
    let forecast: HeuristicOutcome<ForecastReport> = forecast(series.closes()).into();
    let backtest: HeuristicOutcome<BacktestReport> = backtest_signal(series.closes()).into();

    if args.json {
        let combined = serde_json::json!({
            "pair": pair,
            "analysis": result,
            "forecast": forecast,
            "backtest": backtest,
        });
        println!("{}", serde_json::to_string_pretty(&combined)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(50));
    println!("🤖 AI read-out for {} ({})", pair, pair.info().description());
    println!(
        "Trend: {} ({:.1}% confidence), risk {}",
        result.trend_prediction, result.confidence, result.risk_level
    );
    for factor in &result.key_factors {
        println!("  {}", factor);
    }
    for insight in &result.insights {
        println!("  {}", insight);
    }
    println!("\n{}", result.recommendation);
    println!("\nForecast: {}", serde_json::to_string(&forecast)?);
    println!("Backtest: {}", serde_json::to_string(&backtest)?);
    Ok(())
}
