//! Trading-session gate: weekday filter plus an inclusive intraday window.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The daily scanning window in market-local time. Weekends are always
/// outside the session regardless of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        SessionWindow { start, end }
    }

    /// Is `now` (already shifted to the market timezone) inside the session?
    /// Both boundaries are inclusive.
    pub fn contains(&self, now: DateTime<FixedOffset>) -> bool {
        // weekday(): Monday..Sunday numbered 1..7
        if now.weekday().number_from_monday() > 5 {
            return false;
        }
        let t = now.time();
        self.start <= t && t <= self.end
    }
}

/// Current wall-clock time in the market timezone.
pub fn market_now(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const IST_MINUTES: i32 = 330;

    fn window() -> SessionWindow {
        SessionWindow::new(
            NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        )
    }

    fn ist(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(IST_MINUTES * 60)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn saturday_is_always_inactive() {
        // 2025-01-04 is a Saturday
        assert!(!window().contains(ist(2025, 1, 4, 10, 30)));
        assert!(!window().contains(ist(2025, 1, 4, 0, 0)));
        assert!(!window().contains(ist(2025, 1, 4, 23, 59)));
    }

    #[test]
    fn sunday_is_always_inactive() {
        assert!(!window().contains(ist(2025, 1, 5, 11, 0)));
    }

    #[test]
    fn wednesday_boundaries_are_inclusive() {
        // 2025-01-08 is a Wednesday
        assert!(window().contains(ist(2025, 1, 8, 9, 45)), "session start is inclusive");
        assert!(window().contains(ist(2025, 1, 8, 15, 0)), "session end is inclusive");
        assert!(window().contains(ist(2025, 1, 8, 12, 0)));
    }

    #[test]
    fn one_minute_outside_the_window() {
        assert!(!window().contains(ist(2025, 1, 8, 9, 44)));
        assert!(!window().contains(ist(2025, 1, 8, 15, 1)));
    }
}
