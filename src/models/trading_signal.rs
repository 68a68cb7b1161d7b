use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::CurrencyPair;
use crate::models::{IndicatorSet, Signal};
use crate::utils::maths_utils::safe_div;
use crate::utils::time_utils::format_timestamp;

/// Disclaimer appended to every alert and report.
pub const DISCLAIMER: &str = "⚠️ *Educational Only - Not Financial Advice*";

/// Trading opportunity produced for one pair in one check cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TradingSignal {
    pub pair: CurrencyPair,
    pub signal_type: Signal,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub reason: String,
    pub indicators: IndicatorSet,
    pub timestamp: DateTime<Utc>,
    /// Set once a notifier has delivered this signal.
    pub notified: bool,
}

impl TradingSignal {
    /// Reward per unit of risk. Zero when the stop sits on the entry.
    pub fn risk_reward_ratio(&self) -> f64 {
        let risk = (self.entry_price - self.stop_loss).abs();
        let reward = (self.take_profit - self.entry_price).abs();
        safe_div(reward, risk, 0.0)
    }

    /// Multi-line alert text handed to the notification collaborator.
    pub fn alert_message(&self) -> String {
        let emoji = if self.signal_type == Signal::Buy {
            "🟢"
        } else {
            "🔴"
        };

        format!(
            "{emoji} **{pair} {kind} SIGNAL**\n\
             \n\
             📊 *Confidence:* {confidence:.0}%\n\
             💰 *Entry:* {entry:.5}\n\
             🛑 *Stop Loss:* {stop:.5}\n\
             🎯 *Take Profit:* {target:.5}\n\
             \n\
             📈 *Indicators:*\n\
             • RSI: {rsi}\n\
             • SMA 20: {sma20}\n\
             • SMA 50: {sma50}\n\
             • MACD: {macd}\n\
             \n\
             📝 *Reason:* {reason}\n\
             \n\
             ⏰ *Time:* {time}\n\
             \n\
             {DISCLAIMER}",
            pair = self.pair,
            kind = self.signal_type.to_string().to_uppercase(),
            confidence = self.confidence,
            entry = self.entry_price,
            stop = self.stop_loss,
            target = self.take_profit,
            rsi = self.indicators.display("rsi"),
            sma20 = self.indicators.display("sma_20"),
            sma50 = self.indicators.display("sma_50"),
            macd = self.indicators.display("macd"),
            reason = self.reason,
            time = format_timestamp(&self.timestamp),
        )
    }
}

#[cfg(test)]
pub(crate) fn signal_with_confidence(pair: &str, signal_type: Signal, confidence: f64) -> TradingSignal {
    TradingSignal {
        pair: CurrencyPair::new(pair),
        signal_type,
        confidence,
        entry_price: 1.1,
        stop_loss: 1.09,
        take_profit: 1.115,
        reason: String::new(),
        indicators: IndicatorSet::new(),
        timestamp: DateTime::from_timestamp(0, 0).unwrap_or_default(),
        notified: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_reward_ratio() {
        let mut signal = signal_with_confidence("EUR/USD", Signal::Buy, 80.0);
        assert!((signal.risk_reward_ratio() - 1.5).abs() < 1e-9);

        signal.stop_loss = signal.entry_price;
        assert_eq!(signal.risk_reward_ratio(), 0.0);
    }

    #[test]
    fn test_alert_message_layout() {
        let mut signal = signal_with_confidence("GBP/USD", Signal::Sell, 82.4);
        signal.indicators.insert_scalar("rsi", 74.12);
        signal.reason = "BEARISH SIGNALS: RSI overbought;".to_string();

        let text = signal.alert_message();
        assert!(text.starts_with("🔴 **GBP/USD SELL SIGNAL**"));
        assert!(text.contains("📊 *Confidence:* 82%"));
        assert!(text.contains("💰 *Entry:* 1.10000"));
        assert!(text.contains("• RSI: 74.12"));
        assert!(text.contains("• SMA 20: N/A"));
        assert!(text.contains("⏰ *Time:* 1970-01-01 00:00:00"));
        assert!(text.ends_with(DISCLAIMER));
    }
}
