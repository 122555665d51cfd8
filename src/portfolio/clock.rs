//! Source of "today" for date-relative summaries

use chrono::{FixedOffset, NaiveDate, Utc};

/// Buenos Aires offset from UTC, in seconds west
const ARGENTINA_UTC_OFFSET_WEST: i32 = 3 * 3600;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in Argentina time (UTC-3, no DST)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        let now = Utc::now();
        match FixedOffset::west_opt(ARGENTINA_UTC_OFFSET_WEST) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        }
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_is_near_utc() {
        let utc = Utc::now().date_naive();
        let local = SystemClock.today();
        assert!((utc - local).num_days().abs() <= 1);
    }
}
