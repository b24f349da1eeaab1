//! Clock abstraction
//!
//! Record timestamps, upload dates and the "today" fallback used by CSV
//! ingestion all read time through a [`Clock`] so tests can pin it.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Shared, type-erased clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Frozen at midnight UTC of the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            instant: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 11, 20, 23, 59, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 11, 20).unwrap());
    }

    #[test]
    fn test_at_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }
}
