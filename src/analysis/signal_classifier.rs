use crate::config::{ANALYSIS, ClassifierSettings};
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::indicators::{bollinger_bands, ema, macd, rsi, sma};
use crate::models::{AnalysisResult, IndicatorSet, Signal, Trend};
use crate::utils::maths_utils::latest;

/// Rule-based classifier turning a close-price series into trend, signal and confidence.
///
/// Indicators that could not be computed (short history) are recorded as
/// undefined and every comparison involving them is false. That biases the
/// votes towards the "else" branch, which is a known approximation rather
/// than an error.
#[derive(Clone, Copy)]
pub struct SignalClassifier {
    settings: &'static ClassifierSettings,
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self {
            settings: &ANALYSIS.classifier,
        }
    }
}

impl SignalClassifier {
    pub fn new(settings: &'static ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn analyze(&self, closes: &[f64]) -> AnalysisResult {
        let indicators = self.indicator_snapshot(closes);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_indicator_snapshots {
            log::debug!("Indicator snapshot: {:?}", indicators);
        }

        let trend = determine_trend(&indicators);
        let score = self.score(&indicators);
        let (signal, confidence) = self.signal_from_score(score);
        let summary = generate_summary(trend, signal, &indicators);

        AnalysisResult {
            trend,
            signal,
            confidence,
            indicators,
            summary,
        }
    }

    /// Latest value of every indicator the classifier votes on.
    pub fn indicator_snapshot(&self, closes: &[f64]) -> IndicatorSet {
        let s = self.settings;
        let mut indicators = IndicatorSet::new();

        indicators.insert_optional("close", latest(closes));
        indicators.insert_optional("sma_20", latest(&sma(closes, s.sma_short)));
        indicators.insert_optional("sma_50", latest(&sma(closes, s.sma_medium)));
        let sma_long = if closes.len() > s.sma_long {
            latest(&sma(closes, s.sma_long))
        } else {
            None
        };
        indicators.insert_optional("sma_200", sma_long);

        indicators.insert_optional("ema_12", latest(&ema(closes, s.ema_fast)));
        indicators.insert_optional("ema_26", latest(&ema(closes, s.ema_slow)));

        let rsi_value = latest(&rsi(closes, s.rsi_period));
        indicators.insert_optional("rsi", rsi_value);
        indicators.insert_label("rsi_signal", self.rsi_label(rsi_value));

        let lines = macd(closes, s.macd_fast, s.macd_slow, s.macd_signal);
        indicators.insert_optional("macd", latest(&lines.macd));
        indicators.insert_optional("macd_signal", latest(&lines.signal));
        indicators.insert_optional("macd_histogram", latest(&lines.histogram));

        let bands = bollinger_bands(closes, s.bollinger_period, s.bollinger_std_dev);
        indicators.insert_optional("bb_upper", latest(&bands.upper));
        indicators.insert_optional("bb_middle", latest(&bands.middle));
        indicators.insert_optional("bb_lower", latest(&bands.lower));

        indicators
    }

    fn rsi_label(&self, rsi_value: Option<f64>) -> &'static str {
        match rsi_value {
            Some(v) if v > self.settings.rsi_overbought => "overbought",
            Some(v) if v < self.settings.rsi_oversold => "oversold",
            _ => "neutral",
        }
    }

    /// Net bullish (+) / bearish (-) evidence.
    pub fn score(&self, indicators: &IndicatorSet) -> i32 {
        let s = self.settings;
        let rsi_value = indicators.scalar("rsi");
        let mut score = 0;

        if below(rsi_value, Some(s.rsi_oversold)) {
            score += s.rsi_weight;
        } else if above(rsi_value, Some(s.rsi_overbought)) {
            score -= s.rsi_weight;
        }

        if above(indicators.scalar("macd"), indicators.scalar("macd_signal")) {
            score += s.macd_weight;
        } else {
            score -= s.macd_weight;
        }

        if above(indicators.scalar("ema_12"), indicators.scalar("sma_20")) {
            score += s.ema_weight;
        } else {
            score -= s.ema_weight;
        }

        let close = indicators.scalar("close");
        if below(close, indicators.scalar("bb_lower")) {
            score += s.bollinger_weight;
        } else if above(close, indicators.scalar("bb_upper")) {
            score -= s.bollinger_weight;
        }

        score
    }

    pub fn signal_from_score(&self, score: i32) -> (Signal, f64) {
        let s = self.settings;
        if score > s.signal_threshold {
            (Signal::Buy, (score as f64).min(s.max_confidence))
        } else if score < -s.signal_threshold {
            (Signal::Sell, (score.abs() as f64).min(s.max_confidence))
        } else {
            (Signal::Hold, s.hold_confidence)
        }
    }
}

/// Majority of three votes: fast EMA vs SMA-20, SMA-20 vs SMA-50, MACD vs its signal.
pub fn determine_trend(indicators: &IndicatorSet) -> Trend {
    let votes = [
        above(indicators.scalar("ema_12"), indicators.scalar("sma_20")),
        above(indicators.scalar("sma_20"), indicators.scalar("sma_50")),
        above(indicators.scalar("macd"), indicators.scalar("macd_signal")),
    ];
    let bullish = votes.iter().filter(|&&v| v).count();
    let bearish = votes.len() - bullish;

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => Trend::Bullish,
        std::cmp::Ordering::Less => Trend::Bearish,
        std::cmp::Ordering::Equal => Trend::Neutral,
    }
}

pub fn generate_summary(trend: Trend, signal: Signal, indicators: &IndicatorSet) -> String {
    let rsi_text = indicators
        .scalar("rsi")
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let macd_text = indicators
        .scalar("macd")
        .map(|v| format!("{v:.5}"))
        .unwrap_or_else(|| "N/A".to_string());

    [
        format!("Trend: {}", trend.to_string().to_uppercase()),
        format!(
            "RSI: {} ({})",
            rsi_text,
            indicators.label("rsi_signal").unwrap_or("neutral")
        ),
        format!("MACD: {}", macd_text),
        format!("Signal: {}", signal.to_string().to_uppercase()),
    ]
    .join(" | ")
}

// Comparisons against an undefined reading are false.
pub(crate) fn above(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

pub(crate) fn below(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(values: &[(&str, f64)]) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        for (name, value) in values {
            set.insert_scalar(name, *value);
        }
        set
    }

    fn geometric(len: usize, growth: f64) -> Vec<f64> {
        (0..len).map(|i| growth.powi(i as i32)).collect()
    }

    #[test]
    fn test_rising_series_is_bullish_but_overbought() {
        let closes = geometric(250, 1.002);
        let classifier = SignalClassifier::default();
        let result = classifier.analyze(&closes);
        let ind = &result.indicators;

        let ema12 = ind.scalar("ema_12").unwrap();
        let sma20 = ind.scalar("sma_20").unwrap();
        let sma50 = ind.scalar("sma_50").unwrap();
        assert!(ema12 > sma20 && sma20 > sma50);
        assert!(ind.scalar("sma_200").is_some());
        assert_eq!(result.trend, Trend::Bullish);

        // No losses saturates RSI, and the overbought penalty keeps the score at +10
        assert_eq!(ind.scalar("rsi"), Some(100.0));
        assert_eq!(ind.label("rsi_signal"), Some("overbought"));
        assert_eq!(classifier.score(ind), 10);
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn test_falling_series_is_bearish() {
        let closes = geometric(250, 0.998);
        let result = SignalClassifier::default().analyze(&closes);
        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.indicators.label("rsi_signal"), Some("oversold"));
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_sma_200_requires_more_than_200_periods() {
        let classifier = SignalClassifier::default();
        let ind = classifier.indicator_snapshot(&geometric(200, 1.001));
        assert!(ind.contains("sma_200"));
        assert_eq!(ind.scalar("sma_200"), None);
    }

    #[test]
    fn test_full_bullish_evidence_buys() {
        let classifier = SignalClassifier::default();
        let ind = snapshot(&[
            ("rsi", 25.0),
            ("macd", 0.002),
            ("macd_signal", 0.001),
            ("ema_12", 1.105),
            ("sma_20", 1.100),
            ("close", 1.080),
            ("bb_lower", 1.085),
            ("bb_upper", 1.120),
        ]);
        let score = classifier.score(&ind);
        assert_eq!(score, 85);
        assert_eq!(classifier.signal_from_score(score), (Signal::Buy, 85.0));
    }

    #[test]
    fn test_full_bearish_evidence_sells() {
        let classifier = SignalClassifier::default();
        let ind = snapshot(&[
            ("rsi", 81.0),
            ("macd", -0.002),
            ("macd_signal", 0.001),
            ("ema_12", 1.095),
            ("sma_20", 1.100),
            ("close", 1.130),
            ("bb_lower", 1.085),
            ("bb_upper", 1.120),
        ]);
        assert_eq!(classifier.score(&ind), -85);
        assert_eq!(classifier.signal_from_score(-85), (Signal::Sell, 85.0));
    }

    #[test]
    fn test_confidence_is_capped() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.signal_from_score(120), (Signal::Buy, 95.0));
        assert_eq!(classifier.signal_from_score(-41), (Signal::Sell, 41.0));
        assert_eq!(classifier.signal_from_score(40), (Signal::Hold, 50.0));
        assert_eq!(classifier.signal_from_score(-40), (Signal::Hold, 50.0));
    }

    #[test]
    fn test_missing_indicators_vote_bearish_without_panicking() {
        let classifier = SignalClassifier::default();
        let result = classifier.analyze(&[1.1, 1.2, 1.15]);
        assert_eq!(result.indicators.scalar("sma_20"), None);
        assert_eq!(result.trend, Trend::Bearish);
        assert_eq!(result.signal, Signal::Hold);

        let empty = classifier.analyze(&[]);
        assert_eq!(empty.indicators.scalar("close"), None);
        assert_eq!(classifier.score(&empty.indicators), -40);
    }

    #[test]
    fn test_summary_format() {
        let mut ind = snapshot(&[("rsi", 28.44), ("macd", 0.000123)]);
        ind.insert_label("rsi_signal", "oversold");
        let summary = generate_summary(Trend::Bullish, Signal::Buy, &ind);
        assert_eq!(
            summary,
            "Trend: BULLISH | RSI: 28.4 (oversold) | MACD: 0.00012 | Signal: BUY"
        );

        let bare = generate_summary(Trend::Neutral, Signal::Hold, &IndicatorSet::new());
        assert_eq!(bare, "Trend: NEUTRAL | RSI: N/A (neutral) | MACD: N/A | Signal: HOLD");
    }
}
