//! File persistence and serialization configuration

use crate::utils::TimeUtils;

/// Directory path for storing cached price series
pub const CACHE_PATH: &str = "fx_cache";

/// Base filename for series cache files (without extension)
pub const SERIES_FILENAME_WITHOUT_EXT: &str = "series";

/// Current version of the series cache serialization format
pub const SERIES_CACHE_VERSION: f64 = 1.0;

/// Generate interval-specific cache filename
/// Example: "series_1h_v1.bin"
pub fn series_cache_filename(interval_ms: i64) -> String {
    let interval_str = TimeUtils::interval_to_string(interval_ms);
    format!(
        "{}_{}_v{}.bin",
        SERIES_FILENAME_WITHOUT_EXT, interval_str, SERIES_CACHE_VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_filename() {
        assert_eq!(series_cache_filename(TimeUtils::MS_IN_H), "series_1h_v1.bin");
    }
}
