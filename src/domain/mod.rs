// Domain types and value objects
pub mod candle;
pub mod currency_pair;

// Re-export commonly used types
pub use candle::Candle;
pub use currency_pair::{CurrencyPair, PairInfo, format_currency};
