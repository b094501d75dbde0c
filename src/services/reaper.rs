//! Reaper sweep: deletes long-inactive profiles together with their
//! dependent records.
//!
//! Dependents go first (scores, then personal notes), the profile last, so a
//! failure part-way never leaves orphaned rows pointing at a missing profile.
//! A profile whose purge fails is counted and retried on the next sweep.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::interval;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::lifecycle::{PURGE_AFTER_DAYS, SharedClock, add_days, classify_inactivity};
use crate::models::{Role, SweepReport, UserProfile};
use crate::store::{PortalStore, SharedStore};

/// Why a single profile could not be purged.
#[derive(Debug, thiserror::Error)]
pub enum PurgeFailure {
    #[error("failed to delete {collection} for profile: {reason}")]
    DependentDeleteFailed {
        collection: &'static str,
        reason: String,
    },

    #[error("failed to delete profile: {0}")]
    ProfileDeleteFailed(String),
}

/// Run one sweep on behalf of `caller_role`.
///
/// Only a super-user may sweep; anyone else gets `PermissionDenied` before the
/// store is touched. Store errors while listing candidates abort the sweep;
/// errors while purging a single profile are logged and counted.
pub async fn run_reaper_sweep(
    store: &dyn PortalStore,
    caller_role: Role,
    today: NaiveDate,
) -> AppResult<SweepReport> {
    if !caller_role.is_super_user() {
        return Err(AppError::PermissionDenied(
            "Only the super-user may run the reaper".to_string(),
        ));
    }

    let cutoff = add_days(today, -i64::from(PURGE_AFTER_DAYS));
    let candidates = store.profiles_inactive_before(cutoff).await?;

    let mut report = SweepReport::default();

    for profile in candidates {
        if profile.role.is_super_user() {
            continue;
        }
        // The store pre-filters; the classifier has the final say.
        if !classify_inactivity(Some(profile.activity_anchor()), today).is_purge_eligible() {
            continue;
        }

        match purge_profile(store, &profile).await {
            Ok(()) => {
                info!(
                    "Purged inactive profile {} ({}), last active {}",
                    profile.username,
                    profile.id,
                    profile.activity_anchor()
                );
                report.purged += 1;
            }
            Err(e) => {
                warn!("Reaper could not purge {}: {}", profile.id, e);
                report.errors += 1;
            }
        }
    }

    if report.purged > 0 || report.errors > 0 {
        info!(
            "Reaper sweep: {} purged, {} errors",
            report.purged, report.errors
        );
    } else {
        debug!("Reaper sweep: nothing to purge");
    }

    Ok(report)
}

/// Delete a profile and everything that references it.
///
/// Shared with the admin wipe, which applies its own permission checks.
pub(crate) async fn purge_profile(
    store: &dyn PortalStore,
    profile: &UserProfile,
) -> Result<(), PurgeFailure> {
    delete_dependents(store, profile.id).await?;

    store
        .delete_profile(profile.id)
        .await
        .map_err(|e| PurgeFailure::ProfileDeleteFailed(e.to_string()))?;

    Ok(())
}

async fn delete_dependents(store: &dyn PortalStore, user_id: Uuid) -> Result<(), PurgeFailure> {
    let scores = store
        .delete_scores_for(user_id)
        .await
        .map_err(|e| PurgeFailure::DependentDeleteFailed {
            collection: "scores",
            reason: e.to_string(),
        })?;

    let notes = store
        .delete_notes_for(user_id)
        .await
        .map_err(|e| PurgeFailure::DependentDeleteFailed {
            collection: "personal_notes",
            reason: e.to_string(),
        })?;

    debug!(
        "Deleted {} scores and {} notes for {}",
        scores, notes, user_id
    );
    Ok(())
}

/// Start the periodic reaper.
///
/// Sweeps run with super-user authority. An interval of zero disables the
/// task.
pub fn start_reaper_task(store: SharedStore, clock: SharedClock, interval_secs: u64) {
    if interval_secs == 0 {
        info!("Reaper service disabled (interval 0)");
        return;
    }

    tokio::spawn(async move {
        info!("Starting reaper service (interval: {} seconds)", interval_secs);

        let mut ticker = interval(Duration::from_secs(interval_secs));

        loop {
            ticker.tick().await;

            if let Err(e) = run_reaper_sweep(store.as_ref(), Role::SuperUser, clock.today()).await {
                error!("Reaper task error: {}", e);
            }
        }
    });
}

/// Fire-and-forget sweep, used when a super-user establishes a session.
pub fn spawn_background_sweep(store: SharedStore, today: NaiveDate) {
    tokio::spawn(async move {
        if let Err(e) = run_reaper_sweep(store.as_ref(), Role::SuperUser, today).await {
            warn!("Background reaper sweep failed: {}", e);
        }
    });
}
