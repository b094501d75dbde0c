//! Database operations for mock exam scores.

use sea_orm::*;
use uuid::Uuid;

use super::{DbPool, profiles};
use crate::entity::score;
use crate::error::AppResult;
use crate::models::{Score, UserProfile, score_credit};

impl DbPool {
    /// Insert a score and credit its owner in one transaction.
    ///
    /// The profile row is locked `FOR UPDATE` before the accumulators are
    /// read, so concurrent submissions for one user serialize.
    pub async fn record_score_tx(&self, s: &Score) -> AppResult<Option<UserProfile>> {
        let txn = self.connection().begin().await?;

        let Some(model) = profiles::find_for_update(&txn, s.user_id).await? else {
            return Ok(None);
        };

        let patch = score_credit(&profiles::model_to_profile(model.clone()), s);
        let updated = profiles::patched(model, &patch).update(&txn).await?;

        let row = score::ActiveModel {
            id: Set(s.id),
            user_id: Set(s.user_id),
            exam: Set(s.exam.clone()),
            correct: Set(i32::try_from(s.correct).unwrap_or(i32::MAX)),
            total: Set(i32::try_from(s.total).unwrap_or(i32::MAX)),
            percentage: Set(s.percentage),
            taken_on: Set(s.taken_on),
            created_at: Set(s.created_at),
        };
        score::Entity::insert(row).exec(&txn).await?;

        txn.commit().await?;

        Ok(Some(profiles::model_to_profile(updated)))
    }

    /// List scores for a user, newest first.
    pub async fn list_scores_for(&self, user_id: Uuid) -> AppResult<Vec<Score>> {
        let results = score::Entity::find()
            .filter(score::Column::UserId.eq(user_id))
            .order_by_desc(score::Column::CreatedAt)
            .all(self.connection())
            .await?;

        Ok(results.into_iter().map(model_to_score).collect())
    }

    /// Delete every score belonging to a user.
    pub async fn delete_scores_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = score::Entity::delete_many()
            .filter(score::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected)
    }
}

fn model_to_score(m: score::Model) -> Score {
    Score {
        id: m.id,
        user_id: m.user_id,
        exam: m.exam,
        correct: u32::try_from(m.correct).unwrap_or(0),
        total: u32::try_from(m.total).unwrap_or(0),
        percentage: m.percentage,
        taken_on: m.taken_on,
        created_at: m.created_at,
    }
}
