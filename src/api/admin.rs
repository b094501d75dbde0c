//! Administrative endpoints: invites, role changes, wipes and the reaper.

use actix_web::{HttpResponse, delete, post, put, web};
use uuid::Uuid;

use crate::auth::{AdminOrSession, SessionAuth};
use crate::error::{AppError, AppResult};
use crate::lifecycle::SharedClock;
use crate::models::{
    CreateInvitesRequest, CreateInvitesResponse, ProfileResponse, SetRoleRequest, SweepReport,
};
use crate::services::invites::{InviteIssuer, mint_invites};
use crate::services::{admin, run_reaper_sweep};
use crate::store::SharedStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_invites)
        .service(set_role)
        .service(wipe_user)
        .service(run_reaper);
}

/// Mint single-use invite codes.
///
/// Authorization: X-Admin-Key (bootstrap, any role) or a super-user session
/// (any role below super-user).
#[utoipa::path(
    post,
    path = "/api/v1/admin/invites",
    tag = "Admin",
    request_body = CreateInvitesRequest,
    responses(
        (status = 201, description = "Codes minted", body = CreateInvitesResponse),
        (status = 400, description = "Invalid count"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Caller may not mint these codes")
    ),
    security(("admin_key" = []), ("session" = []))
)]
#[post("/admin/invites")]
pub async fn create_invites(
    auth: AdminOrSession,
    body: web::Json<CreateInvitesRequest>,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    let issuer = match auth {
        AdminOrSession::Admin => InviteIssuer::AdminKey,
        AdminOrSession::Session(session) => InviteIssuer::Profile(session.user_id),
    };
    let role = body.role.unwrap_or_default();
    let count = body.count.unwrap_or(1);

    let codes = mint_invites(store.get_ref().as_ref(), issuer, count, role).await?;
    Ok(HttpResponse::Created().json(CreateInvitesResponse { codes, role }))
}

/// Change a user's role.
///
/// The caller must be an elite moderator or above and strictly outrank both
/// the target's current role and the requested one.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/role",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "Target profile id")
    ),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ProfileResponse),
        (status = 403, description = "Caller does not outrank target or role"),
        (status = 404, description = "Target not found")
    ),
    security(("session" = []))
)]
#[put("/admin/users/{id}/role")]
pub async fn set_role(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    body: web::Json<SetRoleRequest>,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
) -> AppResult<HttpResponse> {
    let updated = admin::set_role(
        store.get_ref().as_ref(),
        auth.user_id,
        path.into_inner(),
        body.role,
    )
    .await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::new(updated, clock.today())))
}

/// Delete a user together with their scores and notes.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "Target profile id")
    ),
    responses(
        (status = 204, description = "User wiped"),
        (status = 403, description = "Caller does not outrank target"),
        (status = 404, description = "Target not found")
    ),
    security(("session" = []))
)]
#[delete("/admin/users/{id}")]
pub async fn wipe_user(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    admin::wipe_user(store.get_ref().as_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Run a reaper sweep now. Super-user only.
#[utoipa::path(
    post,
    path = "/api/v1/admin/reaper",
    tag = "Admin",
    responses(
        (status = 200, description = "Sweep finished", body = SweepReport),
        (status = 403, description = "Caller is not the super-user")
    ),
    security(("session" = []))
)]
#[post("/admin/reaper")]
pub async fn run_reaper(
    auth: SessionAuth,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
) -> AppResult<HttpResponse> {
    let caller = store
        .find_profile(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session no longer matches a profile".to_string()))?;

    let report = run_reaper_sweep(store.get_ref().as_ref(), caller.role, clock.today()).await?;
    Ok(HttpResponse::Ok().json(report))
}
