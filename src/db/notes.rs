//! Database operations for personal notes.

use sea_orm::*;
use uuid::Uuid;

use super::DbPool;
use crate::entity::personal_note;
use crate::error::AppResult;
use crate::models::PersonalNote;

impl DbPool {
    /// Insert a new note.
    pub async fn insert_note_row(&self, note: &PersonalNote) -> AppResult<()> {
        let model = personal_note::ActiveModel {
            id: Set(note.id),
            user_id: Set(note.user_id),
            title: Set(note.title.clone()),
            body: Set(note.body.clone()),
            created_at: Set(note.created_at),
        };

        personal_note::Entity::insert(model)
            .exec(self.connection())
            .await?;

        Ok(())
    }

    /// List notes for a user, newest first.
    pub async fn list_notes_for(&self, user_id: Uuid) -> AppResult<Vec<PersonalNote>> {
        let results = personal_note::Entity::find()
            .filter(personal_note::Column::UserId.eq(user_id))
            .order_by_desc(personal_note::Column::CreatedAt)
            .all(self.connection())
            .await?;

        Ok(results
            .into_iter()
            .map(|m| PersonalNote {
                id: m.id,
                user_id: m.user_id,
                title: m.title,
                body: m.body,
                created_at: m.created_at,
            })
            .collect())
    }

    /// Delete one note, only if `user_id` owns it.
    pub async fn delete_note_row(&self, user_id: Uuid, note_id: Uuid) -> AppResult<bool> {
        let result = personal_note::Entity::delete_many()
            .filter(personal_note::Column::Id.eq(note_id))
            .filter(personal_note::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Delete every note belonging to a user.
    pub async fn delete_notes_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = personal_note::Entity::delete_many()
            .filter(personal_note::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected)
    }
}
