use chrono::{DateTime, Utc};

use crate::analysis::signal_classifier::{SignalClassifier, above, below};
use crate::config::{ANALYSIS, TradingSignalSettings};
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::error::AnalysisError;
use crate::indicators::atr;
use crate::models::{IndicatorSet, PriceSeries, Signal, TradingSignal, Trend};
use crate::utils::maths_utils::{latest, round_to};

/// Weighted buy/sell tallies behind a trading signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalVotes {
    pub buy_score: f64,
    pub sell_score: f64,
    pub reasons: Vec<&'static str>,
}

/// Builds one `TradingSignal` per price series: classifier snapshot, RSI/MA/MACD
/// vote, ATR-based stop and target.
#[derive(Clone, Copy)]
pub struct PairAnalyzer {
    classifier: SignalClassifier,
    settings: &'static TradingSignalSettings,
}

impl Default for PairAnalyzer {
    fn default() -> Self {
        Self {
            classifier: SignalClassifier::default(),
            settings: &ANALYSIS.trading_signal,
        }
    }
}

impl PairAnalyzer {
    pub fn analyze_pair(&self, series: &PriceSeries) -> Result<TradingSignal, AnalysisError> {
        self.analyze_pair_at(series, Utc::now())
    }

    pub fn analyze_pair_at(
        &self,
        series: &PriceSeries,
        timestamp: DateTime<Utc>,
    ) -> Result<TradingSignal, AnalysisError> {
        let pair = series.pair.clone();
        let entry_price = series.last_close().ok_or_else(|| AnalysisError::NoData {
            pair: pair.to_string(),
        })?;

        let analysis = self.classifier.analyze(series.closes());
        let votes = self.tally_votes(&analysis.indicators);
        let (signal_type, confidence) = self.decide(&votes);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_signal_votes {
            log::debug!(
                "{}: buy {:.1} / sell {:.1} -> {} ({:.0}%)",
                pair,
                votes.buy_score,
                votes.sell_score,
                signal_type,
                confidence
            );
        }

        let atr_value = latest(&atr(
            &series.high_prices,
            &series.low_prices,
            &series.close_prices,
            self.settings.atr_period,
        ));
        let (stop_loss, take_profit) = self.exits(signal_type, entry_price, atr_value);

        let prefix = match signal_type {
            Signal::Buy => "BULLISH SIGNALS",
            Signal::Sell => "BEARISH SIGNALS",
            _ => "MIXED SIGNALS",
        };
        let reason = format!(
            "{}: {} | Trend: {}",
            prefix,
            votes.reasons.join("; "),
            trend_label(analysis.trend)
        );

        let ind = &analysis.indicators;
        let mut indicators = IndicatorSet::new();
        indicators.insert_optional("rsi", ind.scalar("rsi").map(|v| round_to(v, 2)));
        for key in ["sma_20", "sma_50", "macd"] {
            indicators.insert_optional(key, ind.scalar(key).map(|v| round_to(v, 5)));
        }
        indicators.insert_optional(
            "histogram",
            ind.scalar("macd_histogram").map(|v| round_to(v, 5)),
        );
        indicators.insert_optional("atr", atr_value.map(|v| round_to(v, 5)));

        log::info!(
            "Analyzed {}: {} @ {:.5}",
            pair,
            signal_type.to_string().to_uppercase(),
            entry_price
        );

        Ok(TradingSignal {
            pair,
            signal_type,
            confidence,
            entry_price,
            stop_loss,
            take_profit,
            reason,
            indicators,
            timestamp,
            notified: false,
        })
    }

    /// RSI extremes weigh double; MA and MACD crosses one each; histogram sign half.
    pub fn tally_votes(&self, indicators: &IndicatorSet) -> SignalVotes {
        let s = self.settings;
        let c = &ANALYSIS.classifier;
        let mut votes = SignalVotes {
            buy_score: 0.0,
            sell_score: 0.0,
            reasons: Vec::new(),
        };

        let rsi_value = indicators.scalar("rsi");
        if below(rsi_value, Some(c.rsi_oversold)) {
            votes.buy_score += s.rsi_weight;
            votes.reasons.push("RSI oversold");
        } else if above(rsi_value, Some(c.rsi_overbought)) {
            votes.sell_score += s.rsi_weight;
            votes.reasons.push("RSI overbought");
        }

        if above(indicators.scalar("sma_20"), indicators.scalar("sma_50")) {
            votes.buy_score += s.ma_weight;
            votes.reasons.push("MA bullish");
        } else {
            votes.sell_score += s.ma_weight;
            votes.reasons.push("MA bearish");
        }

        if above(indicators.scalar("macd"), indicators.scalar("macd_signal")) {
            votes.buy_score += s.macd_weight;
            votes.reasons.push("MACD bullish");
        } else {
            votes.sell_score += s.macd_weight;
            votes.reasons.push("MACD bearish");
        }

        if above(indicators.scalar("macd_histogram"), Some(0.0)) {
            votes.buy_score += s.histogram_weight;
        } else {
            votes.sell_score += s.histogram_weight;
        }

        votes
    }

    pub fn decide(&self, votes: &SignalVotes) -> (Signal, f64) {
        let s = self.settings;
        let confidence =
            |score: f64| (s.base_confidence + score * s.confidence_per_point).min(s.max_confidence);

        if votes.buy_score >= s.score_threshold {
            (Signal::Buy, confidence(votes.buy_score))
        } else if votes.sell_score >= s.score_threshold {
            (Signal::Sell, confidence(votes.sell_score))
        } else {
            (Signal::Hold, s.hold_confidence)
        }
    }

    /// Stop and target at ATR multiples from entry. Hold, or an undefined ATR, pins both to entry.
    pub fn exits(&self, signal: Signal, entry: f64, atr_value: Option<f64>) -> (f64, f64) {
        let s = self.settings;
        let atr_value = atr_value.unwrap_or(0.0);
        let (stop, target) = match signal {
            Signal::Buy => (
                entry - s.stop_loss_atr * atr_value,
                entry + s.take_profit_atr * atr_value,
            ),
            Signal::Sell => (
                entry + s.stop_loss_atr * atr_value,
                entry - s.take_profit_atr * atr_value,
            ),
            Signal::Hold | Signal::Neutral => (entry, entry),
        };
        (round_to(stop, 5), round_to(target, 5))
    }
}

fn trend_label(trend: Trend) -> String {
    trend.to_string().to_uppercase()
}
