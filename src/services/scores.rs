//! Mock exam score submission.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::score::{EXAM_NAME_MAX_LEN, percentage};
use crate::models::{ProfileResponse, Score, SubmitScoreRequest, SubmitScoreResponse};
use crate::store::PortalStore;

/// Record a finished mock exam for `user_id`.
///
/// The score row, the streak credit and the GPA accumulators are written by
/// the store in one atomic step, so overlapping submissions all count.
pub async fn submit_score(
    store: &dyn PortalStore,
    user_id: Uuid,
    req: &SubmitScoreRequest,
    today: NaiveDate,
) -> AppResult<SubmitScoreResponse> {
    let exam = req.exam.trim();
    if exam.is_empty() || exam.chars().count() > EXAM_NAME_MAX_LEN {
        return Err(AppError::InvalidInput(format!(
            "Exam name must be between 1 and {} characters",
            EXAM_NAME_MAX_LEN
        )));
    }
    let pct = percentage(req.correct, req.total).ok_or_else(|| {
        AppError::InvalidInput("Total must be positive and at least the correct count".to_string())
    })?;

    let score = Score {
        id: Uuid::now_v7(),
        user_id,
        exam: exam.to_string(),
        correct: req.correct,
        total: req.total,
        percentage: pct,
        taken_on: today,
        created_at: Utc::now(),
    };

    let updated = store
        .record_score(&score)
        .await?
        .ok_or(AppError::ProfileNotFound(user_id))?;

    info!(
        "Score {}% on {} for {} (streak {})",
        pct, score.exam, user_id, updated.streak_count
    );

    Ok(SubmitScoreResponse {
        score,
        profile: ProfileResponse::new(updated, today),
    })
}

/// A user's scores, newest first.
pub async fn list_scores(store: &dyn PortalStore, user_id: Uuid) -> AppResult<Vec<Score>> {
    store.list_scores(user_id).await
}
