//! Shared test helpers for lifecycle E2E tests.

use std::sync::Arc;

use actix_web::{App, dev::ServiceResponse, test, web};
use chrono::NaiveDate;
use exam_portal_lib::auth::{AdminKey, SessionKeys, hash_access_key};
use exam_portal_lib::lifecycle::{FixedClock, SharedClock, add_days};
use exam_portal_lib::models::{NewProfile, Role, UserProfile};
use exam_portal_lib::store::{MemoryStore, SharedStore};
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

/// Admin key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-lifecycle";
/// Session secret used in tests.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-lifecycle";
/// Access key given to every seeded profile.
pub const TEST_ACCESS_KEY: &str = "pk_test_access_key";

/// The day every test runs on.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

pub fn days_ago(n: i64) -> NaiveDate {
    add_days(today(), -n)
}

pub fn session_keys() -> SessionKeys {
    SessionKeys::new(SecretString::from(TEST_SESSION_SECRET.to_string()), 3600)
}

/// Issue a session token without going through login.
pub fn token_for(profile: &UserProfile) -> String {
    session_keys().issue(profile.id, &profile.username).unwrap()
}

/// Seed a profile created 100 days ago, with optional streak state.
pub async fn seed_profile(
    store: &MemoryStore,
    username: &str,
    role: Role,
    last_mock_date: Option<NaiveDate>,
) -> UserProfile {
    let created = days_ago(100);
    let mut profile = NewProfile {
        id: Uuid::new_v4(),
        username: username.to_string(),
        role,
        access_key_hash: hash_access_key(TEST_ACCESS_KEY),
        created_at: created.and_hms_opt(9, 0, 0).unwrap().and_utc(),
        created_on: created,
    }
    .into_profile();
    profile.last_mock_date = last_mock_date;
    store.seed_profile(profile.clone()).await.unwrap();
    profile
}

/// Create a test portal app over `store`, pinned to [`today`].
pub async fn create_test_app(
    store: Arc<MemoryStore>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let shared: SharedStore = store;
    let clock: SharedClock = Arc::new(FixedClock(today()));
    let admin_key = AdminKey::new(Some(SecretString::from(TEST_ADMIN_KEY.to_string())));

    test::init_service(
        App::new()
            .app_data(web::Data::new(shared))
            .app_data(web::Data::new(clock))
            .app_data(web::Data::new(admin_key))
            .app_data(web::Data::new(session_keys()))
            .service(web::scope("/api/v1").configure(exam_portal_lib::api::configure_routes)),
    )
    .await
}

/// Send a request and return the status with the JSON body (Null if empty).
pub async fn send<S>(app: &S, req: actix_http::Request) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Log in with the shared test access key.
pub async fn login<S>(app: &S, username: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({
            "username": username,
            "access_key": TEST_ACCESS_KEY,
        }))
        .to_request();
    send(app, req).await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
