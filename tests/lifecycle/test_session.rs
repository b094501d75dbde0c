//! E2E tests: invites, redemption, login and the own-profile view.

use std::sync::Arc;

use actix_web::test;
use exam_portal_lib::models::Role;
use exam_portal_lib::store::MemoryStore;
use serde_json::{Value, json};

use super::test_helpers::*;

async fn mint_code<S>(app: &S, role: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/invites")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(json!({ "count": 1, "role": role }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, 201, "mint failed: {}", body);
    body["codes"][0].as_str().unwrap().to_string()
}

async fn redeem<S>(app: &S, code: &str, username: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/redeem")
        .set_json(json!({ "code": code, "username": username }))
        .to_request();
    send(app, req).await
}

#[actix_rt::test]
async fn test_redeem_login_and_me() {
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone()).await;

    let code = mint_code(&app, "student").await;
    let (status, body) = redeem(&app, &code, "Marie_C").await;
    assert_eq!(status, 201, "redeem failed: {}", body);
    assert_eq!(body["profile"]["username"], "Marie_C");
    assert_eq!(body["profile"]["role"], "student");
    assert_eq!(body["profile"]["streak_count"], 0);
    let access_key = body["access_key"].as_str().unwrap().to_string();

    // Usernames match case-insensitively at login
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "marie_c", "access_key": access_key }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200, "login failed: {}", body);
    assert!(body.get("access_key").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "Marie_C");
    assert_eq!(body["inactivity"]["tier"], "active");
    assert!(body["gpa"].is_null());
}

#[actix_rt::test]
async fn test_invite_code_is_single_use() {
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store).await;

    let code = mint_code(&app, "student").await;
    let (first, _) = redeem(&app, &code, "first_user").await;
    assert_eq!(first, 201);

    let (second, body) = redeem(&app, &code, "second_user").await;
    assert_eq!(second, 409);
    assert_eq!(body["error"], "CONFLICT");

    let (unknown, _) = redeem(&app, "inv_does_not_exist", "third_user").await;
    assert_eq!(unknown, 404);
}

#[actix_rt::test]
async fn test_duplicate_username_is_rejected_case_insensitively() {
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store).await;

    let a = mint_code(&app, "student").await;
    let b = mint_code(&app, "student").await;
    assert_eq!(redeem(&app, &a, "Grace").await.0, 201);

    let (status, _) = redeem(&app, &b, "GRACE").await;
    assert_eq!(status, 409);

    // The losing code is still redeemable under another name
    assert_eq!(redeem(&app, &b, "Hopper").await.0, 201);
}

#[actix_rt::test]
async fn test_invalid_credentials() {
    let store = Arc::new(MemoryStore::new());
    seed_profile(&store, "alice", Role::Student, Some(today())).await;
    let app = create_test_app(store).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "alice", "access_key": "pk_wrong" }))
        .to_request();
    assert_eq!(send(&app, req).await.0, 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "access_key": TEST_ACCESS_KEY }))
        .to_request();
    assert_eq!(send(&app, req).await.0, 401);

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    assert_eq!(send(&app, req).await.0, 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    assert_eq!(send(&app, req).await.0, 401);
}

#[actix_rt::test]
async fn test_invite_minting_permissions() {
    let store = Arc::new(MemoryStore::new());
    let root = seed_profile(&store, "root", Role::SuperUser, Some(today())).await;
    let elite = seed_profile(&store, "elite", Role::EliteModerator, Some(today())).await;
    let app = create_test_app(store).await;

    let mint = |token: String, role: &'static str| {
        test::TestRequest::post()
            .uri("/api/v1/admin/invites")
            .insert_header(bearer(&token))
            .set_json(json!({ "count": 2, "role": role }))
            .to_request()
    };

    let (status, body) = send(&app, mint(token_for(&root), "moderator")).await;
    assert_eq!(status, 201);
    assert_eq!(body["codes"].as_array().unwrap().len(), 2);

    // Super-user invites only through the admin key
    assert_eq!(send(&app, mint(token_for(&root), "super_user")).await.0, 403);
    assert_eq!(send(&app, mint(token_for(&elite), "student")).await.0, 403);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/invites")
        .insert_header(("X-Admin-Key", "wrong-key"))
        .set_json(json!({}))
        .to_request();
    assert_eq!(send(&app, req).await.0, 401);
}
