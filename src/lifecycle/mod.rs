//! User activity lifecycle: date math, streak evaluation and inactivity tiers.
//!
//! Everything here is pure. Services feed in profile snapshots and a day
//! from a [`Clock`], and persist whatever comes back.

pub mod date_math;
pub mod inactivity;
pub mod streak;

pub use date_math::{
    Clock, FixedClock, SharedClock, SystemClock, add_days, days_between, local_day,
};
pub use inactivity::{InactivityTier, PURGE_AFTER_DAYS, classify_inactivity};
pub use streak::{StreakOutcome, StreakSnapshot, credit_activity, evaluate_streak};
