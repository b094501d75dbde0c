//! E2E tests: leaderboard ranking and inactivity badges.

use std::sync::Arc;

use actix_web::test;
use exam_portal_lib::models::{ProfilePatch, Role};
use exam_portal_lib::store::{MemoryStore, PortalStore};

use super::test_helpers::*;

async fn seed_ranked(
    store: &MemoryStore,
    username: &str,
    role: Role,
    gpa: f64,
    last_active_days_ago: i64,
) {
    let profile = seed_profile(store, username, role, Some(days_ago(last_active_days_ago))).await;
    let patch = ProfilePatch {
        total_percentage_points: Some(gpa * 4.0),
        total_exams_completed: Some(4),
        ..Default::default()
    };
    store.update_profile(profile.id, &patch).await.unwrap();
}

#[actix_rt::test]
async fn test_leaderboard_ranks_and_badges() {
    let store = Arc::new(MemoryStore::new());
    seed_ranked(&store, "root", Role::SuperUser, 100.0, 0).await;
    seed_ranked(&store, "alice", Role::Student, 91.5, 2).await;
    seed_ranked(&store, "bob", Role::Moderator, 80.0, 45).await;
    seed_ranked(&store, "carol", Role::Student, 85.0, 10).await;
    seed_ranked(&store, "stale", Role::Student, 99.0, 61).await;
    let app = create_test_app(store).await;

    let req = test::TestRequest::get().uri("/api/v1/leaderboard").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);

    let entries = body["entries"].as_array().unwrap();
    let names: Vec<_> = entries
        .iter()
        .map(|e| e["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alice", "carol", "bob"]);

    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["inactivity"]["tier"], "active");
    assert_eq!(entries[1]["inactivity"]["tier"], "warning");
    assert_eq!(entries[2]["inactivity"]["tier"], "danger");
    assert_eq!(entries[2]["inactivity"]["remaining_days"], 15);
}

#[actix_rt::test]
async fn test_leaderboard_limit() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..5 {
        seed_ranked(&store, &format!("user{}", i), Role::Student, 50.0 + f64::from(i), 0).await;
    }
    let app = create_test_app(store).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/leaderboard?limit=2")
        .to_request();
    let (_, body) = send(&app, req).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["username"], "user4");
}
