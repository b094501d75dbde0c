//! Invite redemption, login and the caller's own profile.

use actix_web::{HttpResponse, get, post, web};

use crate::auth::{SessionAuth, SessionKeys};
use crate::error::{AppError, AppResult};
use crate::lifecycle::SharedClock;
use crate::models::{LoginRequest, ProfileResponse, RedeemInviteRequest, SessionResponse};
use crate::services::login;
use crate::store::SharedStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(redeem).service(login_handler).service(me);
}

/// Redeem an invite code and create a profile.
///
/// The personal access key in the response is never shown again.
#[utoipa::path(
    post,
    path = "/api/v1/auth/redeem",
    tag = "Session",
    request_body = RedeemInviteRequest,
    responses(
        (status = 201, description = "Profile created", body = SessionResponse),
        (status = 400, description = "Invalid username"),
        (status = 404, description = "Unknown invite code"),
        (status = 409, description = "Code already used or username taken")
    )
)]
#[post("/auth/redeem")]
pub async fn redeem(
    body: web::Json<RedeemInviteRequest>,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
    keys: web::Data<SessionKeys>,
) -> AppResult<HttpResponse> {
    let resp = login::redeem_invite(store.get_ref().as_ref(), &keys, &body, clock.today()).await?;
    Ok(HttpResponse::Created().json(resp))
}

/// Log in with username and personal access key.
///
/// Evaluates the streak once for the new session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[post("/auth/login")]
pub async fn login_handler(
    body: web::Json<LoginRequest>,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
    keys: web::Data<SessionKeys>,
) -> AppResult<HttpResponse> {
    let resp = login::login(store.get_ref(), &keys, &body, clock.today()).await?;
    Ok(HttpResponse::Ok().json(resp))
}

/// Current profile with GPA and inactivity tier.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Session",
    responses(
        (status = 200, description = "Own profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Profile no longer exists")
    ),
    security(("session" = []))
)]
#[get("/me")]
pub async fn me(
    auth: SessionAuth,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
) -> AppResult<HttpResponse> {
    let profile = store
        .find_profile(auth.user_id)
        .await?
        .ok_or(AppError::ProfileNotFound(auth.user_id))?;
    Ok(HttpResponse::Ok().json(ProfileResponse::new(profile, clock.today())))
}
