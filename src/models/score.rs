//! Mock exam score models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ProfilePatch, UserProfile};
use crate::lifecycle::{StreakSnapshot, credit_activity};

/// Maximum length of an exam identifier.
pub const EXAM_NAME_MAX_LEN: usize = 100;

/// A scored mock exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Score {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exam: String,
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
    pub taken_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Request body for submitting a mock exam result.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    /// Exam identifier (e.g., "anatomy-mock-3")
    pub exam: String,
    /// Number of correctly answered questions
    pub correct: u32,
    /// Number of questions in the exam
    pub total: u32,
}

/// Percentage of correct answers, rounded to two decimals.
///
/// Returns `None` for an empty exam or more correct answers than questions.
pub fn percentage(correct: u32, total: u32) -> Option<f64> {
    if total == 0 || correct > total {
        return None;
    }
    let raw = f64::from(correct) * 100.0 / f64::from(total);
    Some((raw * 100.0).round() / 100.0)
}

/// Profile update recording `score` against the current `profile`: the
/// streak credit for the day it was taken plus the GPA accumulators.
///
/// Stores apply this while holding the profile, so the accumulators are read
/// and written as one unit.
pub fn score_credit(profile: &UserProfile, score: &Score) -> ProfilePatch {
    let credited = credit_activity(StreakSnapshot::from(profile), score.taken_on);
    ProfilePatch {
        streak_count: Some(credited.streak_count),
        streak_points: Some(credited.streak_points),
        last_mock_date: Some(credited.last_mock_date),
        total_percentage_points: Some(profile.total_percentage_points + score.percentage),
        total_exams_completed: Some(profile.total_exams_completed.saturating_add(1)),
        ..Default::default()
    }
}

/// Response after a score submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub score: Score,
    pub profile: super::ProfileResponse,
}

/// Response for listing a user's scores.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreListResponse {
    pub scores: Vec<Score>,
}
