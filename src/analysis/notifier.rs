use chrono::{DateTime, Duration, Utc};

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::domain::CurrencyPair;
use crate::models::{Signal, TradingSignal};

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub pair: CurrencyPair,
    pub direction: Signal,
    pub sent_at: DateTime<Utc>,
}

/// Alerts sent during this session. Owned by the caller and dropped on restart,
/// so nothing carries over between runs.
#[derive(Debug, Clone)]
pub struct NotificationLedger {
    window: Duration,
    sent: Vec<NotificationRecord>,
}

impl NotificationLedger {
    pub fn new(window_hours: i64) -> Self {
        Self {
            window: Duration::hours(window_hours),
            sent: Vec::new(),
        }
    }

    /// Hold and neutral signals are never sent; repeats of the same pair and
    /// direction inside the window are suppressed.
    pub fn should_notify(&self, signal: &TradingSignal) -> bool {
        if !signal.signal_type.is_actionable() {
            return false;
        }
        !self.sent.iter().any(|r| {
            r.pair == signal.pair
                && r.direction == signal.signal_type
                && signal.timestamp - r.sent_at < self.window
        })
    }

    /// Marks and records every signal that passes `should_notify`, returning
    /// the alert texts to hand to the delivery channel.
    pub fn check_and_notify(&mut self, signals: &mut [TradingSignal]) -> Vec<String> {
        let mut alerts = Vec::new();
        for signal in signals.iter_mut() {
            if !self.should_notify(signal) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_notification_dedup && signal.signal_type.is_actionable() {
                    log::debug!(
                        "Suppressed repeat {} alert for {}",
                        signal.signal_type,
                        signal.pair
                    );
                }
                continue;
            }
            signal.notified = true;
            self.sent.push(NotificationRecord {
                pair: signal.pair.clone(),
                direction: signal.signal_type,
                sent_at: signal.timestamp,
            });
            alerts.push(signal.alert_message());
        }
        alerts
    }

    pub fn history(&self) -> &[NotificationRecord] {
        &self.sent
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}
