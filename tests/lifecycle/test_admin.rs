//! E2E tests: role changes and explicit wipes.

use std::sync::Arc;

use actix_web::test;
use exam_portal_lib::models::Role;
use exam_portal_lib::store::{MemoryStore, PortalStore};
use serde_json::json;

use super::test_helpers::*;

fn set_role_request(token: &str, target: uuid::Uuid, role: &str) -> actix_http::Request {
    test::TestRequest::put()
        .uri(&format!("/api/v1/admin/users/{}/role", target))
        .insert_header(bearer(token))
        .set_json(json!({ "role": role }))
        .to_request()
}

#[actix_rt::test]
async fn test_role_change_follows_outrank_rule() {
    let store = Arc::new(MemoryStore::new());
    let root = seed_profile(&store, "root", Role::SuperUser, Some(today())).await;
    let elite = seed_profile(&store, "elite", Role::EliteModerator, Some(today())).await;
    let moderator = seed_profile(&store, "mod", Role::Moderator, Some(today())).await;
    let student = seed_profile(&store, "student", Role::Student, Some(today())).await;
    let app = create_test_app(store.clone()).await;

    let (status, body) = send(&app, set_role_request(&token_for(&elite), student.id, "moderator")).await;
    assert_eq!(status, 200, "role change failed: {}", body);
    assert_eq!(body["role"], "moderator");

    // Moderators cannot manage anyone
    let (status, _) = send(&app, set_role_request(&token_for(&moderator), student.id, "student")).await;
    assert_eq!(status, 403);

    // Elite moderators cannot create peers
    let (status, _) =
        send(&app, set_role_request(&token_for(&elite), moderator.id, "elite_moderator")).await;
    assert_eq!(status, 403);

    // Nobody can grant the super-user role over the API
    let (status, _) = send(&app, set_role_request(&token_for(&root), elite.id, "super_user")).await;
    assert_eq!(status, 403);

    let (status, _) = send(&app, set_role_request(&token_for(&root), elite.id, "student")).await;
    assert_eq!(status, 200);
    let demoted = store.find_profile(elite.id).await.unwrap().unwrap();
    assert_eq!(demoted.role, Role::Student);

    // The demotion applies to the existing session immediately
    let (status, _) = send(&app, set_role_request(&token_for(&elite), moderator.id, "student")).await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn test_wipe_removes_user_and_dependents() {
    let store = Arc::new(MemoryStore::new());
    let root = seed_profile(&store, "root", Role::SuperUser, Some(today())).await;
    let student = seed_profile(&store, "student", Role::Student, Some(today())).await;
    let app = create_test_app(store.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/scores")
        .insert_header(bearer(&token_for(&student)))
        .set_json(json!({ "exam": "neuro", "correct": 3, "total": 4 }))
        .to_request();
    assert_eq!(send(&app, req).await.0, 201);

    let wipe = |token: String| {
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", student.id))
            .insert_header(bearer(&token))
            .to_request()
    };

    // A student cannot wipe anyone, including themselves
    assert_eq!(send(&app, wipe(token_for(&student))).await.0, 403);

    assert_eq!(send(&app, wipe(token_for(&root))).await.0, 204);
    assert!(store.find_profile(student.id).await.unwrap().is_none());
    assert!(store.list_scores(student.id).await.unwrap().is_empty());

    assert_eq!(send(&app, wipe(token_for(&root))).await.0, 404);
}
