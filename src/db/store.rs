//! [`PortalStore`] backed by PostgreSQL.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use uuid::Uuid;

use super::DbPool;
use crate::error::AppResult;
use crate::models::{InviteCode, NewProfile, PersonalNote, ProfilePatch, Score, UserProfile};
use crate::store::{PortalStore, Redemption};

#[async_trait]
impl PortalStore for DbPool {
    async fn ping(&self) -> AppResult<()> {
        self.connection()
            .query_one_raw(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT 1",
            ))
            .await?;
        Ok(())
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        self.find_profile_by_id(id).await
    }

    async fn find_profile_by_username(&self, username: &str) -> AppResult<Option<UserProfile>> {
        self.find_profile_by_username_key(username).await
    }

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        self.list_all_profiles().await
    }

    async fn profiles_inactive_before(&self, cutoff: NaiveDate) -> AppResult<Vec<UserProfile>> {
        self.find_profiles_inactive_before(cutoff).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> AppResult<Option<UserProfile>> {
        self.patch_profile(id, patch).await
    }

    async fn delete_profile(&self, id: Uuid) -> AppResult<bool> {
        self.delete_profile_row(id).await
    }

    async fn insert_invite(&self, invite: &InviteCode) -> AppResult<()> {
        self.insert_invite_row(invite).await
    }

    async fn find_invite(&self, code: &str) -> AppResult<Option<InviteCode>> {
        self.find_invite_row(code).await
    }

    async fn redeem_invite(&self, code: &str, profile: NewProfile) -> AppResult<Redemption> {
        self.redeem_invite_tx(code, profile).await
    }

    async fn record_score(&self, score: &Score) -> AppResult<Option<UserProfile>> {
        self.record_score_tx(score).await
    }

    async fn list_scores(&self, user_id: Uuid) -> AppResult<Vec<Score>> {
        self.list_scores_for(user_id).await
    }

    async fn delete_scores_for(&self, user_id: Uuid) -> AppResult<u64> {
        self.delete_scores_by_user(user_id).await
    }

    async fn insert_note(&self, note: &PersonalNote) -> AppResult<()> {
        self.insert_note_row(note).await
    }

    async fn list_notes(&self, user_id: Uuid) -> AppResult<Vec<PersonalNote>> {
        self.list_notes_for(user_id).await
    }

    async fn delete_note(&self, user_id: Uuid, note_id: Uuid) -> AppResult<bool> {
        self.delete_note_row(user_id, note_id).await
    }

    async fn delete_notes_for(&self, user_id: Uuid) -> AppResult<u64> {
        self.delete_notes_by_user(user_id).await
    }
}
