use serde::{Deserialize, Serialize};

use crate::models::IndicatorSet;

/// Direction the indicators lean towards.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// Action suggested by a classifier.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Neutral,
}

impl Signal {
    /// Buy and sell are worth acting on; hold and neutral are not.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }
}

/// Output of the technical signal classifier for one price series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub trend: Trend,
    pub signal: Signal,
    /// Heuristic 0-100 score, not a probability.
    pub confidence: f64,
    pub indicators: IndicatorSet,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_enum_text_forms() {
        assert_eq!(Trend::Bullish.to_string(), "bullish");
        assert_eq!(Signal::from_str("sell").unwrap(), Signal::Sell);
        assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"hold\"");
        assert!(Signal::Buy.is_actionable());
        assert!(!Signal::Neutral.is_actionable());
    }
}
