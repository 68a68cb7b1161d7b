use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::utils::maths_utils::round_to;

const POSITIVE_WORDS: &[&str] = &[
    "gain", "rise", "surge", "rally", "growth", "strong", "bullish", "optimistic", "recovery",
    "breakthrough",
];

const NEGATIVE_WORDS: &[&str] = &[
    "fall", "drop", "decline", "crash", "weak", "bearish", "pessimistic", "recession", "crisis",
    "loss", "plunge",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: SentimentLabel,
    /// Share of positive keyword hits, 0-100 (50 with no hits)
    pub score: f64,
    pub positive_signals: usize,
    pub negative_signals: usize,
    pub analysis: String,
}

/// Number of (headline, keyword) pairs where the keyword appears in the headline.
fn keyword_hits(headlines: &[String], words: &[&str]) -> usize {
    headlines
        .iter()
        .map(|h| h.to_lowercase())
        .map(|h| words.iter().filter(|w| h.contains(*w)).count())
        .sum()
}

/// Case-insensitive substring keyword count across `headlines`.
pub fn score_headlines(headlines: &[String]) -> SentimentReport {
    let positive = keyword_hits(headlines, POSITIVE_WORDS);
    let negative = keyword_hits(headlines, NEGATIVE_WORDS);
    let total = positive + negative;

    let (score, sentiment) = if total == 0 {
        (50.0, SentimentLabel::Neutral)
    } else {
        let score = positive as f64 / total as f64 * 100.0;
        let label = if score > 60.0 {
            SentimentLabel::Bullish
        } else if score < 40.0 {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        };
        (score, label)
    };

    SentimentReport {
        sentiment,
        score: round_to(score, 1),
        positive_signals: positive,
        negative_signals: negative,
        analysis: format!("Based on {} headlines analyzed", headlines.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headlines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_hits_is_neutral_fifty() {
        let report = score_headlines(&headlines(&["Central bank meets on Tuesday"]));
        assert_eq!(report.sentiment, SentimentLabel::Neutral);
        assert_eq!(report.score, 50.0);
        assert_eq!(report.analysis, "Based on 1 headlines analyzed");

        assert_eq!(score_headlines(&[]).score, 50.0);
    }

    #[test]
    fn test_counts_are_case_insensitive_substrings() {
        let report = score_headlines(&headlines(&[
            "Euro RALLIES on strong growth data",
            "Dollar gains as yields rise",
        ]));
        // "rally" does not occur in "rallies"; strong, growth, gain, rise do
        assert_eq!(report.positive_signals, 4);
        assert_eq!(report.negative_signals, 0);
        assert_eq!(report.score, 100.0);
        assert_eq!(report.sentiment, SentimentLabel::Bullish);
    }

    #[test]
    fn test_bearish_mix() {
        let report = score_headlines(&headlines(&[
            "Stocks plunge amid recession fears",
            "Yen weak after crisis talks, slight gain later",
        ]));
        assert_eq!(report.negative_signals, 4);
        assert_eq!(report.positive_signals, 1);
        assert_eq!(report.score, 20.0);
        assert_eq!(report.sentiment, SentimentLabel::Bearish);
    }

    #[test]
    fn test_balanced_is_neutral() {
        let report = score_headlines(&headlines(&["Early gain then drop"]));
        assert_eq!(report.score, 50.0);
        assert_eq!(report.sentiment, SentimentLabel::Neutral);
    }
}
