use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::analysis::patterns::{ChartPattern, PatternRecognizer};
use crate::analysis::sentiment::{SentimentReport, score_headlines};
use crate::analysis::support_resistance::{SupportResistance, support_resistance};
use crate::analysis::trend_prediction::{TrendPrediction, predict_trend};
use crate::error::AnalysisError;
use crate::models::Trend;

const BULLISH_RECOMMENDATION: &str = "🟢 **EDUCATIONAL OBSERVATION**

The technical indicators suggest a potential bullish move, but remember:

1. Always use proper risk management
2. Consider setting stop-loss orders
3. Don't risk more than 1-2% per trade
4. Wait for confirmation before entering

**This is NOT financial advice.** Always do your own research.";

const BEARISH_RECOMMENDATION: &str = "🔴 **EDUCATIONAL OBSERVATION**

The technical indicators suggest a potential bearish move, but remember:

1. Always use proper risk management
2. Consider setting stop-loss orders
3. Don't risk more than 1-2% per trade
4. Wait for confirmation before entering

**This is NOT financial advice.** Always do your own research.";

const MIXED_RECOMMENDATION: &str = "🟡 **EDUCATIONAL OBSERVATION**

Market conditions appear mixed. Consider:

1. Waiting for clearer signals
2. Using smaller position sizes
3. Implementing strict risk management
4. Studying price action closely

**This is NOT financial advice.** Always do your own research.";

const LOW_CONFIDENCE_RECOMMENDATION: &str =
    "⚠️ Low confidence in analysis. Consider waiting for clearer signals.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Volatility is in percent of the mean price.
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 0.5 {
            RiskLevel::Low
        } else if volatility < 1.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Combined heuristic read-out for one pair. Educational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIAnalysisResult {
    pub trend_prediction: Trend,
    pub confidence: f64,
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
    pub key_factors: Vec<String>,
    pub risk_level: RiskLevel,
    pub insights: Vec<String>,
    pub pattern_detected: Option<ChartPattern>,
    pub recommendation: String,
}

/// Runs prediction, support/resistance, pattern and sentiment heuristics together.
pub struct AiAnalyzer {
    recognizer: PatternRecognizer,
}

impl Default for AiAnalyzer {
    fn default() -> Self {
        Self::new(PatternRecognizer::default())
    }
}

impl AiAnalyzer {
    pub fn new(recognizer: PatternRecognizer) -> Self {
        Self { recognizer }
    }

    pub fn comprehensive_analysis(
        &mut self,
        pair: &str,
        prices: &[f64],
        headlines: &[String],
    ) -> Result<AIAnalysisResult, AnalysisError> {
        let prediction = predict_trend(prices)?;
        let levels = support_resistance(prices);
        let patterns = self.recognizer.find_patterns(prices);
        let sentiment = score_headlines(headlines);
        let pattern_detected = patterns.first().map(|m| m.pattern);

        log::debug!(
            "AI analysis {}: {} ({:.1}%), {} pattern(s), sentiment {}",
            pair,
            prediction.current_trend,
            prediction.confidence,
            patterns.len(),
            sentiment.sentiment
        );

        Ok(AIAnalysisResult {
            trend_prediction: prediction.current_trend,
            confidence: prediction.confidence,
            key_factors: key_factors(&prediction, &sentiment),
            risk_level: RiskLevel::from_volatility(prediction.volatility),
            insights: insights(&prediction, &levels, pattern_detected),
            recommendation: recommendation(&prediction).to_string(),
            support_levels: levels.support,
            resistance_levels: levels.resistance,
            pattern_detected,
        })
    }
}

fn key_factors(prediction: &TrendPrediction, sentiment: &SentimentReport) -> Vec<String> {
    let mut factors = Vec::with_capacity(3);

    let momentum = prediction.momentum;
    if momentum > 1.0 {
        factors.push(format!("📈 Positive momentum: {:.2}%", momentum));
    } else if momentum < -1.0 {
        factors.push(format!("📉 Negative momentum: {:.2}%", momentum));
    } else {
        factors.push("➡️ Weak momentum".to_string());
    }

    let volatility = prediction.volatility;
    if volatility > 1.0 {
        factors.push(format!("⚡ High volatility: {:.2}%", volatility));
    } else {
        factors.push(format!("📊 Normal volatility: {:.2}%", volatility));
    }

    let score = sentiment.score;
    if score > 55.0 {
        factors.push(format!("😊 Positive sentiment ({:.0}%)", score));
    } else if score < 45.0 {
        factors.push(format!("😟 Negative sentiment ({:.0}%)", score));
    } else {
        factors.push(format!("😐 Neutral sentiment ({:.0}%)", score));
    }

    factors
}

fn insights(
    prediction: &TrendPrediction,
    levels: &SupportResistance,
    pattern: Option<ChartPattern>,
) -> Vec<String> {
    let mut insights = vec![
        match prediction.current_trend {
            Trend::Bullish => "🟢 Short-term trend appears bullish",
            Trend::Bearish => "🔴 Short-term trend appears bearish",
            Trend::Neutral => "🟡 Market in consolidation phase",
        }
        .to_string(),
    ];

    if let Some(support) = levels.support.first() {
        insights.push(format!("📊 Key support near {:.5}", support));
    }
    if let Some(resistance) = levels.resistance.first() {
        insights.push(format!("📈 Key resistance near {:.5}", resistance));
    }
    if let Some(pattern) = pattern {
        insights.push(format!("📐 {} pattern detected", pattern.title()));
    }
    if prediction.volatility > 1.0 {
        insights.push("⚠️ Higher than average volatility".to_string());
    }

    insights
}

fn recommendation(prediction: &TrendPrediction) -> &'static str {
    if prediction.confidence < 50.0 {
        return LOW_CONFIDENCE_RECOMMENDATION;
    }
    match prediction.current_trend {
        Trend::Bullish => BULLISH_RECOMMENDATION,
        Trend::Bearish => BEARISH_RECOMMENDATION,
        Trend::Neutral => MIXED_RECOMMENDATION,
    }
}
