//! Permission changes and explicit account wipes.
//!
//! Both follow the same rule: the caller must be an elite moderator or above
//! and strictly outrank the target. A role change must additionally stay
//! strictly below the caller's own role, so nobody can mint a peer.

use tracing::{info, warn};
use uuid::Uuid;

use super::reaper::purge_profile;
use crate::error::{AppError, AppResult};
use crate::models::{ProfilePatch, Role, UserProfile};
use crate::store::PortalStore;

async fn load_caller(store: &dyn PortalStore, caller_id: Uuid) -> AppResult<UserProfile> {
    store
        .find_profile(caller_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session no longer matches a profile".to_string()))
}

fn check_outranks(caller: &UserProfile, target: &UserProfile) -> AppResult<()> {
    if !caller.role.is_elite_mod() {
        return Err(AppError::PermissionDenied(
            "Elite moderator role required".to_string(),
        ));
    }
    if caller.role <= target.role {
        return Err(AppError::PermissionDenied(format!(
            "A {} cannot manage a {}",
            caller.role, target.role
        )));
    }
    Ok(())
}

/// Change the role of `target_id` on behalf of `caller_id`.
pub async fn set_role(
    store: &dyn PortalStore,
    caller_id: Uuid,
    target_id: Uuid,
    new_role: Role,
) -> AppResult<UserProfile> {
    let caller = load_caller(store, caller_id).await?;
    if new_role.is_super_user() {
        return Err(AppError::PermissionDenied(
            "The super-user role cannot be granted".to_string(),
        ));
    }

    let target = store
        .find_profile(target_id)
        .await?
        .ok_or(AppError::ProfileNotFound(target_id))?;
    check_outranks(&caller, &target)?;
    if caller.role <= new_role {
        return Err(AppError::PermissionDenied(format!(
            "A {} cannot grant {}",
            caller.role, new_role
        )));
    }

    if target.role == new_role {
        return Ok(target);
    }

    let patch = ProfilePatch {
        role: Some(new_role),
        ..Default::default()
    };
    let updated = store
        .update_profile(target_id, &patch)
        .await?
        .ok_or(AppError::ProfileNotFound(target_id))?;

    info!(
        "{} changed role of {} from {} to {}",
        caller.username, updated.username, target.role, new_role
    );
    Ok(updated)
}

/// Delete `target_id` and its dependents on behalf of `caller_id`.
pub async fn wipe_user(store: &dyn PortalStore, caller_id: Uuid, target_id: Uuid) -> AppResult<()> {
    let caller = load_caller(store, caller_id).await?;
    let target = store
        .find_profile(target_id)
        .await?
        .ok_or(AppError::ProfileNotFound(target_id))?;
    check_outranks(&caller, &target)?;

    purge_profile(store, &target).await.map_err(|e| {
        warn!("Wipe of {} failed: {}", target_id, e);
        AppError::StoreUnavailable(e.to_string())
    })?;

    info!("{} wiped profile {} ({})", caller.username, target.username, target.id);
    Ok(())
}
