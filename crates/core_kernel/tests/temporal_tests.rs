//! Tests for the clock abstraction

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{Clock, FixedClock, SharedClock, SystemClock};
use std::sync::Arc;

#[test]
fn test_system_clock_is_close_to_now() {
    let before = Utc::now();
    let now = SystemClock.now();
    let after = Utc::now();
    assert!(now >= before && now <= after);
}

#[test]
fn test_fixed_clock_never_moves() {
    let instant = Utc.with_ymd_and_hms(2024, 11, 15, 9, 30, 0).unwrap();
    let clock = FixedClock::new(instant);
    assert_eq!(clock.now(), instant);
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert_eq!(clock.now(), instant);
}

#[test]
fn test_shared_clock_dispatch() {
    let date = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let clock: SharedClock = Arc::new(FixedClock::at_date(date));
    assert_eq!(clock.today(), date);
}
