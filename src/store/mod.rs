//! Storage collaborator for profiles and their dependent collections.
//!
//! Services only talk to [`PortalStore`]. The PostgreSQL implementation lives
//! in [`crate::db`]; [`MemoryStore`] backs tests and throwaway dev servers.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{InviteCode, NewProfile, PersonalNote, ProfilePatch, Score, UserProfile};

pub use memory::MemoryStore;

/// Shared handle to the configured store.
pub type SharedStore = Arc<dyn PortalStore>;

/// Outcome of an invite redemption attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Redemption {
    Created(UserProfile),
    /// Code does not exist
    UnknownCode,
    /// Code was already consumed
    CodeUsed,
    /// Username is taken (case-insensitive)
    UsernameTaken,
}

#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> AppResult<()>;

    // Profiles

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Case-insensitive username lookup.
    async fn find_profile_by_username(&self, username: &str) -> AppResult<Option<UserProfile>>;

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>>;

    /// Profiles whose activity anchor (last mock date, or creation day before
    /// any activity) is strictly before `cutoff`.
    async fn profiles_inactive_before(&self, cutoff: NaiveDate) -> AppResult<Vec<UserProfile>>;

    /// Apply a partial update. Returns `None` when the profile is gone.
    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch)
    -> AppResult<Option<UserProfile>>;

    /// Delete a profile row. Returns whether a row was removed.
    async fn delete_profile(&self, id: Uuid) -> AppResult<bool>;

    // Invites

    async fn insert_invite(&self, invite: &InviteCode) -> AppResult<()>;

    async fn find_invite(&self, code: &str) -> AppResult<Option<InviteCode>>;

    /// Consume `code` and create the profile in one atomic step.
    async fn redeem_invite(&self, code: &str, profile: NewProfile) -> AppResult<Redemption>;

    // Scores

    /// Insert `score` and apply [`score_credit`] to its owner in one atomic
    /// step. Returns the updated profile, or `None` (and writes nothing) when
    /// the owner is gone.
    ///
    /// [`score_credit`]: crate::models::score_credit
    async fn record_score(&self, score: &Score) -> AppResult<Option<UserProfile>>;

    async fn list_scores(&self, user_id: Uuid) -> AppResult<Vec<Score>>;

    /// Returns the number of rows removed.
    async fn delete_scores_for(&self, user_id: Uuid) -> AppResult<u64>;

    // Personal notes

    async fn insert_note(&self, note: &PersonalNote) -> AppResult<()>;

    async fn list_notes(&self, user_id: Uuid) -> AppResult<Vec<PersonalNote>>;

    /// Delete one note owned by `user_id`.
    async fn delete_note(&self, user_id: Uuid, note_id: Uuid) -> AppResult<bool>;

    /// Returns the number of rows removed.
    async fn delete_notes_for(&self, user_id: Uuid) -> AppResult<u64>;
}
