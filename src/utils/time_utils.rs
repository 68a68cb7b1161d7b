use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_H * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Convert interval in milliseconds to the shorthand used by the data feeds (e.g. `15m`, `1h`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_5_MIN => "5m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "1h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_D => "1d",
            Self::MS_IN_W => "1w",
            _ => "unknown",
        }
    }

    /// Inverse of [`TimeUtils::interval_to_string`].
    pub fn interval_from_string(interval: &str) -> Option<i64> {
        match interval {
            "1m" => Some(Self::MS_IN_MIN),
            "5m" => Some(Self::MS_IN_5_MIN),
            "15m" => Some(Self::MS_IN_15_MIN),
            "30m" => Some(Self::MS_IN_30_MIN),
            "1h" => Some(Self::MS_IN_H),
            "4h" => Some(Self::MS_IN_4_H),
            "1d" => Some(Self::MS_IN_D),
            "1w" => Some(Self::MS_IN_W),
            _ => None,
        }
    }
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => format_timestamp(&dt),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_round_trip() {
        for name in ["1m", "15m", "1h", "4h", "1d"] {
            let ms = TimeUtils::interval_from_string(name).unwrap();
            assert_eq!(TimeUtils::interval_to_string(ms), name);
        }
        assert_eq!(TimeUtils::interval_from_string("7h"), None);
    }

    #[test]
    fn test_epoch_formatting() {
        assert_eq!(epoch_ms_to_utc(0), "1970-01-01 00:00:00");
    }
}
