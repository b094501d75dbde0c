//! Streak evaluation on login and streak credit on scored activity.

use chrono::NaiveDate;
use serde::Serialize;

use super::date_math::{add_days, days_between};
use crate::models::UserProfile;

/// A streak point is awarded every time the streak reaches a multiple of this.
pub const STREAK_POINT_INTERVAL: u32 = 7;
/// Upper bound on banked streak points.
pub const MAX_STREAK_POINTS: u32 = 3;

/// Streak-relevant slice of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSnapshot {
    pub last_mock_date: Option<NaiveDate>,
    pub streak_count: u32,
    pub streak_points: u32,
}

impl From<&UserProfile> for StreakSnapshot {
    fn from(p: &UserProfile) -> Self {
        Self {
            last_mock_date: p.last_mock_date,
            streak_count: p.streak_count,
            streak_points: p.streak_points,
        }
    }
}

/// Result of evaluating a streak at session establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakOutcome {
    /// No activity yet, or the last activity was today or yesterday.
    Unchanged,
    /// One banked point paid for a missed day; the date moves to yesterday.
    PointConsumed {
        streak_points: u32,
        last_mock_date: NaiveDate,
    },
    /// No points left: the counter drops to zero, the date stays.
    StreakReset,
}

impl StreakOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Apply the outcome to a profile snapshot, returning the new snapshot.
    pub fn apply(&self, mut profile: UserProfile) -> UserProfile {
        match *self {
            Self::Unchanged => {}
            Self::PointConsumed {
                streak_points,
                last_mock_date,
            } => {
                profile.streak_points = streak_points;
                profile.last_mock_date = Some(last_mock_date);
            }
            Self::StreakReset => profile.streak_count = 0,
        }
        profile
    }
}

/// Decide what a login on `today` does to the streak.
///
/// Same-day and next-day evaluations are no-ops, so repeated calls within a
/// day are safe. A full reset leaves `last_mock_date` where it was, which
/// means a later evaluation sees the same gap and resets again (to an
/// already-zero counter).
pub fn evaluate_streak(snapshot: StreakSnapshot, today: NaiveDate) -> StreakOutcome {
    let Some(last) = snapshot.last_mock_date else {
        return StreakOutcome::Unchanged;
    };

    // A future date means the clock moved backwards; leave the streak alone.
    if last > today || days_between(last, today) <= 1 {
        return StreakOutcome::Unchanged;
    }

    if snapshot.streak_points > 0 {
        StreakOutcome::PointConsumed {
            streak_points: snapshot.streak_points - 1,
            last_mock_date: add_days(today, -1),
        }
    } else {
        StreakOutcome::StreakReset
    }
}

/// Credit a scored activity on `today` to the streak.
///
/// Returns the new snapshot: consecutive days extend the streak, same-day
/// repeats keep it, anything else restarts it at one. Reaching a multiple of
/// [`STREAK_POINT_INTERVAL`] banks a point, up to [`MAX_STREAK_POINTS`].
pub fn credit_activity(snapshot: StreakSnapshot, today: NaiveDate) -> StreakSnapshot {
    let streak_count = match snapshot.last_mock_date {
        Some(last) if last == today => snapshot.streak_count.max(1),
        Some(last) if last < today && days_between(last, today) == 1 => {
            snapshot.streak_count.saturating_add(1)
        }
        _ => 1,
    };

    let milestone = streak_count != snapshot.streak_count
        && streak_count.is_multiple_of(STREAK_POINT_INTERVAL);
    let streak_points = if milestone {
        snapshot
            .streak_points
            .saturating_add(1)
            .min(MAX_STREAK_POINTS)
    } else {
        snapshot.streak_points
    };

    StreakSnapshot {
        last_mock_date: Some(today),
        streak_count,
        streak_points,
    }
}
