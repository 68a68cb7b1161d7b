// Price feeds and on-disk series caches
pub mod cache_file;
pub mod feed;

// Re-export commonly used types
pub use cache_file::CacheFile;
pub use feed::{CollectionFeed, FallbackFeed, PriceFeed, SampleFeed};
