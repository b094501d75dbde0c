//! E2E tests: the reaper sweep endpoint and the sweep triggered by a
//! super-user login.

use std::sync::Arc;
use std::time::Duration;

use actix_web::test;
use chrono::Utc;
use exam_portal_lib::models::{PersonalNote, Role, Score, UserProfile};
use exam_portal_lib::store::{MemoryStore, PortalStore};
use uuid::Uuid;

use super::test_helpers::*;

async fn seed_with_dependents(store: &MemoryStore, username: &str, role: Role, idle: i64) -> UserProfile {
    let profile = seed_profile(store, username, role, Some(days_ago(idle))).await;
    store
        .record_score(&Score {
            id: Uuid::new_v4(),
            user_id: profile.id,
            exam: "mock".to_string(),
            correct: 7,
            total: 10,
            percentage: 70.0,
            taken_on: days_ago(idle),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
        .insert_note(&PersonalNote {
            id: Uuid::new_v4(),
            user_id: profile.id,
            title: "note".to_string(),
            body: String::new(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    profile
}

fn reaper_request(token: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/admin/reaper")
        .insert_header(bearer(token))
        .to_request()
}

#[actix_rt::test]
async fn test_only_super_user_may_sweep() {
    let store = Arc::new(MemoryStore::new());
    let elite = seed_profile(&store, "elite", Role::EliteModerator, Some(today())).await;
    let stale = seed_with_dependents(&store, "stale", Role::Student, 90).await;
    let app = create_test_app(store.clone()).await;

    let (status, body) = send(&app, reaper_request(&token_for(&elite))).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "PERMISSION_DENIED");
    assert!(store.find_profile(stale.id).await.unwrap().is_some());

    let req = test::TestRequest::post().uri("/api/v1/admin/reaper").to_request();
    assert_eq!(send(&app, req).await.0, 401);
}

#[actix_rt::test]
async fn test_sweep_purges_stale_profiles_with_dependents() {
    let store = Arc::new(MemoryStore::new());
    let root = seed_with_dependents(&store, "root", Role::SuperUser, 300).await;
    let stale = seed_with_dependents(&store, "stale", Role::Student, 61).await;
    let danger = seed_with_dependents(&store, "danger", Role::Student, 45).await;
    let edge = seed_with_dependents(&store, "edge", Role::Moderator, 60).await;
    let app = create_test_app(store.clone()).await;

    let (status, body) = send(&app, reaper_request(&token_for(&root))).await;
    assert_eq!(status, 200, "sweep failed: {}", body);
    assert_eq!(body["purged"], 1);
    assert_eq!(body["errors"], 0);

    assert!(store.find_profile(stale.id).await.unwrap().is_none());
    assert!(store.list_scores(stale.id).await.unwrap().is_empty());
    assert!(store.list_notes(stale.id).await.unwrap().is_empty());

    for kept in [&root, &danger, &edge] {
        assert!(store.find_profile(kept.id).await.unwrap().is_some());
        assert_eq!(store.list_scores(kept.id).await.unwrap().len(), 1);
    }

    // Nothing changed in between, so the second sweep purges nothing
    let (status, body) = send(&app, reaper_request(&token_for(&root))).await;
    assert_eq!(status, 200);
    assert_eq!(body["purged"], 0);
}

#[actix_rt::test]
async fn test_super_user_login_triggers_background_sweep() {
    let store = Arc::new(MemoryStore::new());
    seed_profile(&store, "root", Role::SuperUser, Some(today())).await;
    let stale = seed_with_dependents(&store, "stale", Role::Student, 75).await;
    let app = create_test_app(store.clone()).await;

    let (status, _) = login(&app, "root").await;
    assert_eq!(status, 200);

    let mut purged = false;
    for _ in 0..50 {
        if store.find_profile(stale.id).await.unwrap().is_none() {
            purged = true;
            break;
        }
        actix_rt::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(purged, "background sweep did not purge the stale profile");
    assert!(store.list_scores(stale.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_student_login_does_not_sweep() {
    let store = Arc::new(MemoryStore::new());
    seed_profile(&store, "student", Role::Student, Some(today())).await;
    let stale = seed_with_dependents(&store, "stale", Role::Student, 75).await;
    let app = create_test_app(store.clone()).await;

    assert_eq!(login(&app, "student").await.0, 200);
    actix_rt::time::sleep(Duration::from_millis(100)).await;
    assert!(store.find_profile(stale.id).await.unwrap().is_some());
}
