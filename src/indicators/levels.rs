use serde::{Deserialize, Serialize};

/// Retracement ratios measured down from the swing high.
pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Classic floor-trader pivot levels derived from the previous period.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PivotPoints {
    pub r4: f64,
    pub r3: f64,
    pub r2: f64,
    pub r1: f64,
    pub pp: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
}

pub fn fibonacci_retracements(high: f64, low: f64) -> Vec<FibonacciLevel> {
    let diff = high - low;
    FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            ratio,
            price: high - ratio * diff,
        })
        .collect()
}

pub fn pivot_points(prev_high: f64, prev_low: f64, prev_close: f64) -> PivotPoints {
    let (h, l) = (prev_high, prev_low);
    let pp = (h + l + prev_close) / 3.0;

    PivotPoints {
        r4: h + 3.0 * (pp - l),
        r3: h + 2.0 * (pp - l),
        r2: pp + (h - l),
        r1: 2.0 * pp - l,
        pp,
        s1: 2.0 * pp - h,
        s2: pp - (h - l),
        s3: l - 2.0 * (h - pp),
        s4: l - 3.0 * (h - pp),
    }
}

impl PivotPoints {
    /// Levels from highest to lowest, labelled.
    pub fn levels(&self) -> [(&'static str, f64); 9] {
        [
            ("R4", self.r4),
            ("R3", self.r3),
            ("R2", self.r2),
            ("R1", self.r1),
            ("PP", self.pp),
            ("S1", self.s1),
            ("S2", self.s2),
            ("S3", self.s3),
            ("S4", self.s4),
        ]
    }
}
