//! Personal study notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const NOTE_TITLE_MAX_LEN: usize = 200;
pub const NOTE_BODY_MAX_LEN: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PersonalNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteListResponse {
    pub notes: Vec<PersonalNote>,
}
