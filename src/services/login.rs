//! Invite redemption, login, and the streak evaluation that runs once per
//! session establishment.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::reaper::spawn_background_sweep;
use crate::auth::{SessionKeys, generate_access_key, hash_access_key, verify_access_key};
use crate::error::{AppError, AppResult};
use crate::lifecycle::{StreakSnapshot, evaluate_streak};
use crate::models::{
    LoginRequest, NewProfile, ProfilePatch, ProfileResponse, RedeemInviteRequest, SessionResponse,
    UserProfile, validate_username,
};
use crate::store::{PortalStore, Redemption, SharedStore};

const INVALID_CREDENTIALS: &str = "Invalid username or access key";

/// Redeem an invite code: create the profile and open its first session.
///
/// The personal access key is generated here and returned exactly once; only
/// its hash is stored.
pub async fn redeem_invite(
    store: &dyn PortalStore,
    keys: &SessionKeys,
    req: &RedeemInviteRequest,
    today: NaiveDate,
) -> AppResult<SessionResponse> {
    let username = validate_username(&req.username).map_err(AppError::InvalidInput)?;
    let code = req.code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidInput("Invite code is required".to_string()));
    }

    let role = store
        .find_invite(code)
        .await?
        .map(|invite| invite.role)
        .ok_or_else(|| AppError::NotFound("Invite code".to_string()))?;

    let access_key = generate_access_key();
    let new = NewProfile {
        id: Uuid::now_v7(),
        username,
        role,
        access_key_hash: hash_access_key(&access_key),
        created_at: Utc::now(),
        created_on: today,
    };

    let profile = match store.redeem_invite(code, new).await? {
        Redemption::Created(profile) => profile,
        Redemption::UnknownCode => return Err(AppError::NotFound("Invite code".to_string())),
        Redemption::CodeUsed => {
            return Err(AppError::Conflict(
                "Invite code has already been used".to_string(),
            ));
        }
        Redemption::UsernameTaken => {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                req.username.trim()
            )));
        }
    };

    info!(
        "Redeemed invite for {} ({}) as {}",
        profile.username, profile.id, profile.role
    );

    let token = keys.issue(profile.id, &profile.username)?;
    Ok(SessionResponse {
        token,
        expires_in: keys.ttl_secs(),
        access_key: Some(access_key),
        profile: ProfileResponse::new(profile, today),
    })
}

/// Authenticate with username and access key, evaluate the streak and open a
/// session.
///
/// A super-user login also kicks off a reaper sweep in the background; the
/// response does not wait for it.
pub async fn login(
    store: &SharedStore,
    keys: &SessionKeys,
    req: &LoginRequest,
    today: NaiveDate,
) -> AppResult<SessionResponse> {
    let profile = store
        .find_profile_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_access_key(req.access_key.trim(), &profile.access_key_hash) {
        debug!("Rejected login for {}", profile.id);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let profile = evaluate_streak_on_login(store.as_ref(), profile, today).await?;

    if profile.role.is_super_user() {
        spawn_background_sweep(store.clone(), today);
    }

    let token = keys.issue(profile.id, &profile.username)?;
    Ok(SessionResponse {
        token,
        expires_in: keys.ttl_secs(),
        access_key: None,
        profile: ProfileResponse::new(profile, today),
    })
}

/// Evaluate the streak for a freshly authenticated profile and persist the
/// outcome.
///
/// Writes at most one partial update, and none when nothing changed. If the
/// profile disappeared in the meantime (e.g. purged), the input snapshot is
/// returned unchanged.
pub async fn evaluate_streak_on_login(
    store: &dyn PortalStore,
    profile: UserProfile,
    today: NaiveDate,
) -> AppResult<UserProfile> {
    let outcome = evaluate_streak(StreakSnapshot::from(&profile), today);
    if !outcome.is_change() {
        return Ok(profile);
    }

    let updated = outcome.apply(profile.clone());
    let patch = ProfilePatch::diff(&profile, &updated);
    if patch.is_empty() {
        return Ok(profile);
    }

    match store.update_profile(profile.id, &patch).await? {
        Some(stored) => {
            info!("Streak for {}: {:?}", stored.id, outcome);
            Ok(stored)
        }
        None => {
            warn!(
                "{}; skipping streak update",
                AppError::ProfileNotFound(profile.id)
            );
            Ok(profile)
        }
    }
}
