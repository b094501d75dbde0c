//! Inactivity tiers shared by the leaderboard, profile view and reaper.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::date_math::days_between;

/// Days of inactivity after which an account is purged.
pub const PURGE_AFTER_DAYS: u32 = 60;
/// Days of inactivity after which the purge countdown is shown.
pub const DANGER_AFTER_DAYS: u32 = 30;
/// Days of inactivity after which a warning badge is shown.
pub const WARNING_AFTER_DAYS: u32 = 7;

/// Severity tier for a given period of inactivity, healthiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum InactivityTier {
    Active,
    Warning,
    /// Purge countdown: days left before the account becomes purge eligible.
    Danger { remaining_days: u32 },
    PurgeEligible,
}

impl InactivityTier {
    /// Rank used for ordering tiers by severity.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Warning => 1,
            Self::Danger { .. } => 2,
            Self::PurgeEligible => 3,
        }
    }

    pub fn is_purge_eligible(&self) -> bool {
        matches!(self, Self::PurgeEligible)
    }
}

/// Classify days since the last activity. A missing date counts as maximal
/// inactivity.
pub fn classify_inactivity(last_active: Option<NaiveDate>, today: NaiveDate) -> InactivityTier {
    match last_active {
        // Activity dated in the future is as fresh as it gets.
        Some(last) if last >= today => InactivityTier::Active,
        Some(last) => classify_days(days_between(last, today)),
        None => InactivityTier::PurgeEligible,
    }
}

/// Classify a raw day count.
pub fn classify_days(days_since: u32) -> InactivityTier {
    if days_since > PURGE_AFTER_DAYS {
        InactivityTier::PurgeEligible
    } else if days_since > DANGER_AFTER_DAYS {
        InactivityTier::Danger {
            remaining_days: PURGE_AFTER_DAYS - days_since,
        }
    } else if days_since > WARNING_AFTER_DAYS {
        InactivityTier::Warning
    } else {
        InactivityTier::Active
    }
}
