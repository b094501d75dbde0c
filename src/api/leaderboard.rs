//! Public leaderboard.

use actix_web::{HttpResponse, get, web};

use crate::error::AppResult;
use crate::lifecycle::SharedClock;
use crate::models::{LeaderboardQuery, LeaderboardResponse};
use crate::services::leaderboard::build_leaderboard;
use crate::store::SharedStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(leaderboard);
}

/// Ranked profiles with their inactivity badges.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    tag = "Leaderboard",
    params(
        ("limit" = Option<u32>, Query, description = "Entries to return (1-100, default 25)")
    ),
    responses(
        (status = 200, description = "Leaderboard", body = LeaderboardResponse)
    )
)]
#[get("/leaderboard")]
pub async fn leaderboard(
    query: web::Query<LeaderboardQuery>,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
) -> AppResult<HttpResponse> {
    let entries =
        build_leaderboard(store.get_ref().as_ref(), clock.today(), query.clamped_limit()).await?;
    Ok(HttpResponse::Ok().json(LeaderboardResponse { entries }))
}
