//! In-memory [`PortalStore`] for tests and development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PortalStore, Redemption};
use crate::error::{AppError, AppResult};
use crate::models::{
    InviteCode, NewProfile, PersonalNote, ProfilePatch, Score, UserProfile, score_credit,
};

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, UserProfile>,
    /// Lowercased username -> profile id
    usernames: HashMap<String, Uuid>,
    invites: HashMap<String, InviteCode>,
    scores: Vec<Score>,
    notes: Vec<PersonalNote>,
}

/// All tables behind a single lock, so redemption is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    #[cfg(test)]
    failing_dependents: std::sync::Mutex<std::collections::HashSet<Uuid>>,
    #[cfg(test)]
    slow_reads: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed profile, bypassing invites. Used for seeding.
    pub async fn seed_profile(&self, profile: UserProfile) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let key = profile.username.to_lowercase();
        if tables.usernames.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "Username {} already exists",
                profile.username
            )));
        }
        tables.usernames.insert(key, profile.id);
        tables.profiles.insert(profile.id, profile);
        Ok(())
    }

    /// Make dependent deletes for `user_id` fail.
    #[cfg(test)]
    pub fn fail_dependent_deletes_for(&self, user_id: Uuid) {
        if let Ok(mut set) = self.failing_dependents.lock() {
            set.insert(user_id);
        }
    }

    #[cfg(test)]
    fn check_dependent_delete(&self, user_id: Uuid) -> AppResult<()> {
        let failing = self
            .failing_dependents
            .lock()
            .map(|set| set.contains(&user_id))
            .unwrap_or(false);
        if failing {
            return Err(AppError::StoreUnavailable(format!(
                "injected delete failure for {}",
                user_id
            )));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_dependent_delete(&self, _user_id: Uuid) -> AppResult<()> {
        Ok(())
    }

    /// Yield to the scheduler after every profile read, like a network round
    /// trip would.
    #[cfg(test)]
    pub fn slow_down_reads(&self) {
        self.slow_reads
            .store(true, std::sync::atomic::Ordering::Relaxed);
    }

    #[cfg(test)]
    async fn read_latency(&self) {
        if self.slow_reads.load(std::sync::atomic::Ordering::Relaxed) {
            tokio::task::yield_now().await;
        }
    }

    #[cfg(not(test))]
    async fn read_latency(&self) {}
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let profile = self.tables.read().await.profiles.get(&id).cloned();
        self.read_latency().await;
        Ok(profile)
    }

    async fn find_profile_by_username(&self, username: &str) -> AppResult<Option<UserProfile>> {
        let tables = self.tables.read().await;
        let Some(id) = tables.usernames.get(&username.trim().to_lowercase()) else {
            return Ok(None);
        };
        Ok(tables.profiles.get(id).cloned())
    }

    async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        let mut profiles: Vec<UserProfile> =
            self.tables.read().await.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }

    async fn profiles_inactive_before(&self, cutoff: NaiveDate) -> AppResult<Vec<UserProfile>> {
        Ok(self
            .tables
            .read()
            .await
            .profiles
            .values()
            .filter(|p| p.activity_anchor() < cutoff)
            .cloned()
            .collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> AppResult<Option<UserProfile>> {
        let mut tables = self.tables.write().await;
        let Some(profile) = tables.profiles.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(profile);
        Ok(Some(profile.clone()))
    }

    async fn delete_profile(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.profiles.remove(&id) {
            Some(profile) => {
                tables.usernames.remove(&profile.username.to_lowercase());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_invite(&self, invite: &InviteCode) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.invites.contains_key(&invite.code) {
            return Err(AppError::Conflict(format!(
                "Invite code {} already exists",
                invite.code
            )));
        }
        tables.invites.insert(invite.code.clone(), invite.clone());
        Ok(())
    }

    async fn find_invite(&self, code: &str) -> AppResult<Option<InviteCode>> {
        Ok(self.tables.read().await.invites.get(code).cloned())
    }

    async fn redeem_invite(&self, code: &str, profile: NewProfile) -> AppResult<Redemption> {
        let mut tables = self.tables.write().await;

        match tables.invites.get(code) {
            None => return Ok(Redemption::UnknownCode),
            Some(invite) if invite.is_used() => return Ok(Redemption::CodeUsed),
            Some(_) => {}
        }

        let key = profile.username.to_lowercase();
        if tables.usernames.contains_key(&key) {
            return Ok(Redemption::UsernameTaken);
        }

        let created = profile.into_profile();
        if let Some(invite) = tables.invites.get_mut(code) {
            invite.used_by = Some(created.id);
            invite.used_at = Some(created.created_at);
        }
        tables.usernames.insert(key, created.id);
        tables.profiles.insert(created.id, created.clone());

        Ok(Redemption::Created(created))
    }

    async fn record_score(&self, score: &Score) -> AppResult<Option<UserProfile>> {
        let mut tables = self.tables.write().await;
        let Some(profile) = tables.profiles.get_mut(&score.user_id) else {
            return Ok(None);
        };
        score_credit(profile, score).apply_to(profile);
        let updated = profile.clone();
        tables.scores.push(score.clone());
        Ok(Some(updated))
    }

    async fn list_scores(&self, user_id: Uuid) -> AppResult<Vec<Score>> {
        let mut scores: Vec<Score> = self
            .tables
            .read()
            .await
            .scores
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scores)
    }

    async fn delete_scores_for(&self, user_id: Uuid) -> AppResult<u64> {
        self.check_dependent_delete(user_id)?;
        let mut tables = self.tables.write().await;
        let before = tables.scores.len();
        tables.scores.retain(|s| s.user_id != user_id);
        Ok((before - tables.scores.len()) as u64)
    }

    async fn insert_note(&self, note: &PersonalNote) -> AppResult<()> {
        self.tables.write().await.notes.push(note.clone());
        Ok(())
    }

    async fn list_notes(&self, user_id: Uuid) -> AppResult<Vec<PersonalNote>> {
        let mut notes: Vec<PersonalNote> = self
            .tables
            .read()
            .await
            .notes
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn delete_note(&self, user_id: Uuid, note_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables
            .notes
            .retain(|n| !(n.id == note_id && n.user_id == user_id));
        Ok(tables.notes.len() < before)
    }

    async fn delete_notes_for(&self, user_id: Uuid) -> AppResult<u64> {
        self.check_dependent_delete(user_id)?;
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables.notes.retain(|n| n.user_id != user_id);
        Ok((before - tables.notes.len()) as u64)
    }
}
