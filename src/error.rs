use thiserror::Error;

/// Failures raised by the analysis core.
///
/// None of these are fatal to a scan: the aggregator logs them per pair and
/// moves on to the next instrument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Insufficient data: {available} periods available, {required} required")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("No data available for {pair}")]
    NoData { pair: String },

    #[error("Unknown currency pair: {0}")]
    UnknownPair(String),
}

impl AnalysisError {
    /// Guard used by every operation that enforces a minimum history length.
    pub fn require(required: usize, available: usize) -> Result<(), AnalysisError> {
        if available < required {
            Err(AnalysisError::InsufficientHistory {
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}
