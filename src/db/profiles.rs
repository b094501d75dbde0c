//! Database operations for user profiles.

use chrono::{NaiveDate, Utc};
use sea_orm::*;
use uuid::Uuid;

use super::DbPool;
use crate::entity::profile;
use crate::error::AppResult;
use crate::models::{NewProfile, ProfilePatch, Role, UserProfile};

impl DbPool {
    /// Find a profile by ID.
    pub async fn find_profile_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let result = profile::Entity::find_by_id(id)
            .one(self.connection())
            .await?;

        Ok(result.map(model_to_profile))
    }

    /// Find a profile by username, ignoring case.
    pub async fn find_profile_by_username_key(
        &self,
        username: &str,
    ) -> AppResult<Option<UserProfile>> {
        find_by_username_key(self.connection(), username).await
    }

    /// List every profile, oldest first.
    pub async fn list_all_profiles(&self) -> AppResult<Vec<UserProfile>> {
        let results = profile::Entity::find()
            .order_by_asc(profile::Column::CreatedAt)
            .all(self.connection())
            .await?;

        Ok(results.into_iter().map(model_to_profile).collect())
    }

    /// Profiles whose last activity, or creation day if they have none, is
    /// before `cutoff`.
    pub async fn find_profiles_inactive_before(
        &self,
        cutoff: NaiveDate,
    ) -> AppResult<Vec<UserProfile>> {
        let results = profile::Entity::find()
            .filter(
                Condition::any()
                    .add(profile::Column::LastMockDate.lt(cutoff))
                    .add(
                        Condition::all()
                            .add(profile::Column::LastMockDate.is_null())
                            .add(profile::Column::CreatedOn.lt(cutoff)),
                    ),
            )
            .order_by_asc(profile::Column::LastMockDate)
            .all(self.connection())
            .await?;

        Ok(results.into_iter().map(model_to_profile).collect())
    }

    /// Apply a partial update. Returns `None` if the profile does not exist.
    pub async fn patch_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> AppResult<Option<UserProfile>> {
        let Some(model) = profile::Entity::find_by_id(id)
            .one(self.connection())
            .await?
        else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(model_to_profile(model)));
        }

        let active = patched(model, patch);

        match active.update(self.connection()).await {
            Ok(updated) => Ok(Some(model_to_profile(updated))),
            // Deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a profile row. Dependents must already be gone.
    pub async fn delete_profile_row(&self, id: Uuid) -> AppResult<bool> {
        let result = profile::Entity::delete_by_id(id)
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Lock the profile row for the rest of the transaction.
pub(super) async fn find_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<profile::Model>, DbErr> {
    profile::Entity::find_by_id(id).lock_exclusive().one(db).await
}

/// Active model carrying `patch` on top of `model`.
pub(super) fn patched(model: profile::Model, patch: &ProfilePatch) -> profile::ActiveModel {
    let mut active: profile::ActiveModel = model.into();
    if let Some(role) = patch.role {
        active.role = Set(role.as_str().to_string());
    }
    if let Some(count) = patch.streak_count {
        active.streak_count = Set(to_db_int(count));
    }
    if let Some(points) = patch.streak_points {
        active.streak_points = Set(to_db_int(points));
    }
    if let Some(date) = patch.last_mock_date {
        active.last_mock_date = Set(date);
    }
    if let Some(total) = patch.total_percentage_points {
        active.total_percentage_points = Set(total);
    }
    if let Some(exams) = patch.total_exams_completed {
        active.total_exams_completed = Set(to_db_int(exams));
    }
    active.updated_at = Set(Utc::now());
    active
}

pub(super) async fn find_by_username_key<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<UserProfile>> {
    let result = profile::Entity::find()
        .filter(profile::Column::UsernameKey.eq(username.trim().to_lowercase()))
        .one(db)
        .await?;

    Ok(result.map(model_to_profile))
}

/// Insert a freshly created profile.
pub(super) async fn insert<C: ConnectionTrait>(db: &C, new: NewProfile) -> Result<UserProfile, DbErr> {
    let created = new.into_profile();

    let model = profile::ActiveModel {
        id: Set(created.id),
        username: Set(created.username.clone()),
        username_key: Set(created.username.to_lowercase()),
        role: Set(created.role.as_str().to_string()),
        streak_count: Set(0),
        streak_points: Set(0),
        last_mock_date: Set(None),
        total_percentage_points: Set(0.0),
        total_exams_completed: Set(0),
        access_key_hash: Set(created.access_key_hash.clone()),
        created_at: Set(created.created_at),
        created_on: Set(created.created_on),
        updated_at: Set(created.created_at),
    };

    profile::Entity::insert(model).exec(db).await?;

    Ok(created)
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_db_int(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

pub(super) fn model_to_profile(m: profile::Model) -> UserProfile {
    UserProfile {
        id: m.id,
        username: m.username,
        role: Role::parse(&m.role).unwrap_or_default(),
        streak_count: from_db_int(m.streak_count),
        streak_points: from_db_int(m.streak_points),
        last_mock_date: m.last_mock_date,
        total_percentage_points: m.total_percentage_points,
        total_exams_completed: from_db_int(m.total_exams_completed),
        access_key_hash: m.access_key_hash,
        created_at: m.created_at,
        created_on: m.created_on,
    }
}
