use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{CACHE_PATH, series_cache_filename};
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::models::SeriesCollection;

/// Serialized price history for one interval, as written by `make_sample_cache`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub interval_ms: i64,
    pub data: SeriesCollection,
}

impl CacheFile {
    pub fn new(interval_ms: i64, data: SeriesCollection, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: Utc::now().timestamp_millis(),
            interval_ms,
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: CacheFile = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::debug!(
                "Loaded cache v{} with {} series from {:?}",
                cache.version,
                cache.data.series_data.len(),
                path
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn default_cache_path(interval_ms: i64) -> PathBuf {
        PathBuf::from(CACHE_PATH).join(series_cache_filename(interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeseries::series_from_closes;
    use crate::utils::TimeUtils;

    #[test]
    fn test_save_then_load_keeps_series() {
        let collection = SeriesCollection {
            name: "test".to_string(),
            version: 1.0,
            series_data: vec![series_from_closes("EUR/USD", &[1.08, 1.09, 1.07])],
        };
        let cache = CacheFile::new(TimeUtils::MS_IN_H, collection, 1.0);

        let dir = std::env::temp_dir().join(format!("fx_scout_cache_{}", std::process::id()));
        let path = dir.join("series.bin");
        cache.save_to_path(&path).unwrap();
        let loaded = CacheFile::load_from_path(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.interval_ms, TimeUtils::MS_IN_H);
        assert_eq!(loaded.data.series_data, cache.data.series_data);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CacheFile::load_from_path(Path::new("definitely/not/here.bin")).unwrap_err();
        assert!(err.to_string().contains("Failed to open cache file"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            CacheFile::default_cache_path(TimeUtils::MS_IN_4_H),
            PathBuf::from("fx_cache").join("series_4h_v1.bin")
        );
    }
}
