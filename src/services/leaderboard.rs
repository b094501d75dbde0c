//! Read-only leaderboard with inactivity badges.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::lifecycle::classify_inactivity;
use crate::models::{LeaderboardEntry, UserProfile};
use crate::store::PortalStore;

/// Rank visible profiles: GPA descending (profiles without exams last), then
/// streak descending, then username.
///
/// The super-user is never listed, and neither are profiles the reaper would
/// purge.
pub async fn build_leaderboard(
    store: &dyn PortalStore,
    today: NaiveDate,
    limit: usize,
) -> AppResult<Vec<LeaderboardEntry>> {
    let profiles = store.list_profiles().await?;
    Ok(rank_profiles(profiles, today, limit))
}

fn rank_profiles(profiles: Vec<UserProfile>, today: NaiveDate, limit: usize) -> Vec<LeaderboardEntry> {
    let mut visible: Vec<_> = profiles
        .into_iter()
        .filter(|p| !p.role.is_super_user())
        .map(|p| {
            let tier = classify_inactivity(Some(p.activity_anchor()), today);
            (p, tier)
        })
        .filter(|(_, tier)| !tier.is_purge_eligible())
        .collect();

    visible.sort_by(|(a, _), (b, _)| {
        compare_gpa(b.gpa(), a.gpa())
            .then_with(|| b.streak_count.cmp(&a.streak_count))
            .then_with(|| a.username.to_lowercase().cmp(&b.username.to_lowercase()))
    });

    visible
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (p, tier))| LeaderboardEntry {
            rank: u32::try_from(i + 1).unwrap_or(u32::MAX),
            gpa: p.gpa(),
            user_id: p.id,
            username: p.username,
            role: p.role,
            streak_count: p.streak_count,
            total_exams_completed: p.total_exams_completed,
            inactivity: tier,
        })
        .collect()
}

fn compare_gpa(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
