//! Calendar-day arithmetic and the clock abstraction.
//!
//! Every activity date in the portal is a `NaiveDate`. Timestamps are
//! truncated to the local calendar day before any comparison, so time-of-day
//! and DST drift never change a day count.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};

/// Source of "today" in the portal's local reference.
pub trait Clock: Send + Sync {
    /// Current calendar day.
    fn today(&self) -> NaiveDate;
}

/// Shared handle to the configured clock.
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock truncated to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Build a clock for the given offset in minutes east of UTC.
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::with_offset_minutes(0)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        local_day(Utc::now(), self.offset)
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Truncate an instant to the calendar day it falls on at `offset`.
pub fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Whole days between two calendar dates, regardless of argument order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let days = (b - a).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// `date` shifted by `n` days (negative moves backwards).
///
/// Saturates at the representable calendar range.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = Duration::try_days(n).and_then(|d| date.checked_add_signed(d));
    match shifted {
        Some(d) => d,
        None if n < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}
