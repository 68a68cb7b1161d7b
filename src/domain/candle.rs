use serde::{Deserialize, Serialize};

/// One OHLCV record for a single period.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp_ms: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        timestamp_ms: i64,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Candle {
            timestamp_ms,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    /// Prices are finite and the high/low envelope is not inverted.
    pub fn is_well_formed(&self) -> bool {
        [
            self.open_price,
            self.high_price,
            self.low_price,
            self.close_price,
        ]
        .iter()
        .all(|p| p.is_finite())
            && self.high_price >= self.low_price
    }
}
