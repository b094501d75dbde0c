//! The reaper's candidate query, including the creation-day fallback.
//!
//! Runs on a far-future day so its rows never look stale to the sweep tests
//! sharing the database.

use std::collections::HashSet;

use chrono::NaiveDate;
use exam_portal_lib::lifecycle::{PURGE_AFTER_DAYS, add_days};
use exam_portal_lib::models::Role;
use exam_portal_lib::store::PortalStore;

use super::test_helpers::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2300, 1, 1).unwrap()
}

fn days_ago(n: i64) -> NaiveDate {
    add_days(today(), -n)
}

#[actix_rt::test]
async fn test_inactive_before_matches_activity_anchor() {
    let Some(pool) = create_test_pool().await else {
        return;
    };

    let stale = seed_profile(&pool, Role::Student, days_ago(200), Some(days_ago(61))).await;
    let edge = seed_profile(&pool, Role::Student, days_ago(200), Some(days_ago(60))).await;
    let recent = seed_profile(&pool, Role::Moderator, days_ago(200), Some(days_ago(3))).await;
    let never_old = seed_profile(&pool, Role::Student, days_ago(100), None).await;
    let never_new = seed_profile(&pool, Role::Student, days_ago(10), None).await;
    // Old account, recent activity: the activity wins over the creation day
    let revived = seed_profile(&pool, Role::Student, days_ago(400), Some(days_ago(1))).await;

    let cutoff = add_days(today(), -i64::from(PURGE_AFTER_DAYS));
    let found: HashSet<_> = pool
        .profiles_inactive_before(cutoff)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert!(found.contains(&stale.id), "61 days idle must be a candidate");
    assert!(found.contains(&never_old.id), "never active, created 100 days ago");
    assert!(!found.contains(&edge.id), "exactly 60 days is kept");
    assert!(!found.contains(&recent.id));
    assert!(!found.contains(&never_new.id));
    assert!(!found.contains(&revived.id));
}

#[actix_rt::test]
async fn test_creation_day_is_stored_as_given() {
    let Some(pool) = create_test_pool().await else {
        return;
    };

    let created_on = days_ago(100);
    let profile = seed_profile(&pool, Role::Student, created_on, None).await;

    let stored = pool.find_profile(profile.id).await.unwrap().unwrap();
    assert_eq!(stored.created_on, created_on);
    assert_eq!(stored.activity_anchor(), created_on);
    assert_eq!(stored.last_mock_date, None);
}
