//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, lifecycle, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exam Portal Server",
        version = "0.3.0",
        description = "API server for the exam-preparation portal: invites, mock scores, streaks, leaderboard and the inactivity reaper"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Session endpoints
        api::session::redeem,
        api::session::login_handler,
        api::session::me,
        // Score endpoints
        api::scores::submit_score,
        api::scores::list_scores,
        // Note endpoints
        api::notes::create_note,
        api::notes::list_notes,
        api::notes::delete_note,
        // Leaderboard
        api::leaderboard::leaderboard,
        // Admin endpoints
        api::admin::create_invites,
        api::admin::set_role,
        api::admin::wipe_user,
        api::admin::run_reaper,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Profiles
            models::Role,
            models::ProfileResponse,
            models::SetRoleRequest,
            lifecycle::InactivityTier,
            // Session
            models::RedeemInviteRequest,
            models::LoginRequest,
            models::SessionResponse,
            // Scores
            models::Score,
            models::SubmitScoreRequest,
            models::SubmitScoreResponse,
            models::ScoreListResponse,
            // Notes
            models::PersonalNote,
            models::CreateNoteRequest,
            models::NoteListResponse,
            // Leaderboard
            models::LeaderboardEntry,
            models::LeaderboardResponse,
            // Admin
            models::CreateInvitesRequest,
            models::CreateInvitesResponse,
            models::SweepReport,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Session", description = "Invite redemption, login and own profile"),
        (name = "Scores", description = "Mock exam results"),
        (name = "Notes", description = "Personal study notes"),
        (name = "Leaderboard", description = "Public ranking with inactivity badges"),
        (name = "Admin", description = "Invites, role changes, wipes and the reaper")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add session and admin key security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::config::ADMIN_KEY_HEADER,
                ))),
            );
        }
    }
}
