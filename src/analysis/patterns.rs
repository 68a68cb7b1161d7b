use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::config::ANALYSIS;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartPattern {
    DoubleTop,
    DoubleBottom,
    HeadShoulders,
    AscendingTriangle,
    DescendingTriangle,
    SymmetricalTriangle,
}

impl ChartPattern {
    pub fn description(&self) -> &'static str {
        match self {
            ChartPattern::DoubleTop => "Bearish reversal pattern",
            ChartPattern::DoubleBottom => "Bullish reversal pattern",
            ChartPattern::HeadShoulders => "Classic reversal pattern",
            ChartPattern::AscendingTriangle => "Bullish continuation pattern",
            ChartPattern::DescendingTriangle => "Bearish continuation pattern",
            ChartPattern::SymmetricalTriangle => "Continuation pattern (breakout expected)",
        }
    }

    /// "head_shoulders" -> "Head Shoulders"
    pub fn title(&self) -> String {
        self.to_string()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Shortest series a detector will look at.
    pub fn min_length(&self) -> usize {
        match self {
            ChartPattern::HeadShoulders => 30,
            _ => 20,
        }
    }
}

/// How a pattern match was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DetectionMethod {
    /// Placeholder recognizer: length guard only, never reports a match.
    NaivePattern,
    /// Reserved for a trained recognizer.
    ModelPattern,
}

pub trait PatternDetector: Send + Sync {
    fn pattern(&self) -> ChartPattern;
    fn method(&self) -> DetectionMethod;
    fn detect(&self, prices: &[f64]) -> bool;
}

/// Stub detector. Beyond the minimum-length guard it always answers "not found".
pub struct NaiveDetector {
    pattern: ChartPattern,
}

impl NaiveDetector {
    pub fn new(pattern: ChartPattern) -> Self {
        Self { pattern }
    }
}

impl PatternDetector for NaiveDetector {
    fn pattern(&self) -> ChartPattern {
        self.pattern
    }

    fn method(&self) -> DetectionMethod {
        DetectionMethod::NaivePattern
    }

    fn detect(&self, prices: &[f64]) -> bool {
        if prices.len() < self.pattern.min_length() {
            return false;
        }
        false
    }
}

/// Source of the confidence attached to a positive match.
pub trait ConfidenceSource: Send {
    fn draw(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform draw from `[min, max]`.
pub struct RandomConfidence {
    rng: StdRng,
}

impl RandomConfidence {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ConfidenceSource for RandomConfidence {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..=max)
    }
}

/// Always returns the same value, clamped into the requested range.
pub struct FixedConfidence(pub f64);

impl ConfidenceSource for FixedConfidence {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        self.0.clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: ChartPattern,
    pub method: DetectionMethod,
    pub confidence: f64,
    pub description: String,
}

pub struct PatternRecognizer {
    detectors: Vec<Box<dyn PatternDetector>>,
    confidence: Box<dyn ConfidenceSource>,
}

impl PatternRecognizer {
    /// One naive detector per known pattern.
    pub fn new(confidence: Box<dyn ConfidenceSource>) -> Self {
        let detectors = ChartPattern::iter()
            .map(|p| Box::new(NaiveDetector::new(p)) as Box<dyn PatternDetector>)
            .collect();
        Self::with_detectors(detectors, confidence)
    }

    pub fn with_detectors(
        detectors: Vec<Box<dyn PatternDetector>>,
        confidence: Box<dyn ConfidenceSource>,
    ) -> Self {
        Self {
            detectors,
            confidence,
        }
    }

    /// Matches in detector order.
    pub fn find_patterns(&mut self, prices: &[f64]) -> Vec<PatternMatch> {
        let h = &ANALYSIS.heuristics;
        let mut found = Vec::new();
        for detector in &self.detectors {
            if detector.detect(prices) {
                let pattern = detector.pattern();
                found.push(PatternMatch {
                    pattern,
                    method: detector.method(),
                    confidence: self
                        .confidence
                        .draw(h.pattern_confidence_min, h.pattern_confidence_max),
                    description: pattern.description().to_string(),
                });
            }
        }
        found
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new(Box::new(RandomConfidence::from_entropy()))
    }
}
