use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_3_MIN: i64 = Self::MS_IN_MIN * 3;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;

    /// Convert an interval in milliseconds to the provider shorthand (e.g. `5m`, `1h`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_3_MIN => "3m",
            Self::MS_IN_5_MIN => "5m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "1h",
            _ => "unknown",
        }
    }
}

/// Epoch milliseconds as a wall-clock `HH:MM` string. Used for log lines only.
pub fn epoch_ms_to_hhmm(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_shorthand_round_trip() {
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_5_MIN), "5m");
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_H), "1h");
        assert_eq!(TimeUtils::interval_to_string(123), "unknown");
    }

    #[test]
    fn epoch_formatting() {
        // 1970-01-01 09:45 UTC
        let ms = (9 * 3600 + 45 * 60) * 1000;
        assert_eq!(epoch_ms_to_hhmm(ms), "09:45");
    }
}
