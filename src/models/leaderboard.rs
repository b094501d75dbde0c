//! Leaderboard and reaper DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Role;
use crate::lifecycle::InactivityTier;

/// Query parameters for the leaderboard.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

impl LeaderboardQuery {
    /// Clamp limit to 1..=100, default 25.
    pub fn clamped_limit(&self) -> usize {
        self.limit.unwrap_or(25).clamp(1, 100) as usize
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub gpa: Option<f64>,
    pub streak_count: u32,
    pub total_exams_completed: u32,
    /// Status badge
    pub inactivity: InactivityTier,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Outcome of one reaper sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SweepReport {
    /// Profiles deleted together with their dependents
    pub purged: u32,
    /// Profiles whose purge failed and will be retried next sweep
    pub errors: u32,
}
