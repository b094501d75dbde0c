//! Personal study notes.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::note::{NOTE_BODY_MAX_LEN, NOTE_TITLE_MAX_LEN};
use crate::models::{CreateNoteRequest, PersonalNote};
use crate::store::PortalStore;

pub async fn create_note(
    store: &dyn PortalStore,
    user_id: Uuid,
    req: &CreateNoteRequest,
) -> AppResult<PersonalNote> {
    let title = req.title.trim();
    if title.is_empty() || title.chars().count() > NOTE_TITLE_MAX_LEN {
        return Err(AppError::InvalidInput(format!(
            "Title must be between 1 and {} characters",
            NOTE_TITLE_MAX_LEN
        )));
    }
    if req.body.chars().count() > NOTE_BODY_MAX_LEN {
        return Err(AppError::InvalidInput(format!(
            "Body must be at most {} characters",
            NOTE_BODY_MAX_LEN
        )));
    }

    // Notes must not outlive their owner
    if store.find_profile(user_id).await?.is_none() {
        return Err(AppError::ProfileNotFound(user_id));
    }

    let note = PersonalNote {
        id: Uuid::now_v7(),
        user_id,
        title: title.to_string(),
        body: req.body.clone(),
        created_at: Utc::now(),
    };
    store.insert_note(&note).await?;
    Ok(note)
}

pub async fn list_notes(store: &dyn PortalStore, user_id: Uuid) -> AppResult<Vec<PersonalNote>> {
    store.list_notes(user_id).await
}

/// Delete a note owned by `user_id`. Someone else's note looks missing.
pub async fn delete_note(store: &dyn PortalStore, user_id: Uuid, note_id: Uuid) -> AppResult<()> {
    if store.delete_note(user_id, note_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Note {}", note_id)))
    }
}
