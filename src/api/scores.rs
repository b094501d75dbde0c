//! Mock exam score endpoints.

use actix_web::{HttpResponse, get, post, web};

use crate::auth::SessionAuth;
use crate::error::AppResult;
use crate::lifecycle::SharedClock;
use crate::models::{ScoreListResponse, SubmitScoreRequest, SubmitScoreResponse};
use crate::services::scores;
use crate::store::SharedStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_score).service(list_scores);
}

/// Submit a finished mock exam.
#[utoipa::path(
    post,
    path = "/api/v1/scores",
    tag = "Scores",
    request_body = SubmitScoreRequest,
    responses(
        (status = 201, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Invalid counts or exam name"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("session" = []))
)]
#[post("/scores")]
pub async fn submit_score(
    auth: SessionAuth,
    body: web::Json<SubmitScoreRequest>,
    store: web::Data<SharedStore>,
    clock: web::Data<SharedClock>,
) -> AppResult<HttpResponse> {
    let resp =
        scores::submit_score(store.get_ref().as_ref(), auth.user_id, &body, clock.today()).await?;
    Ok(HttpResponse::Created().json(resp))
}

/// List own scores, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/scores",
    tag = "Scores",
    responses(
        (status = 200, description = "Own scores", body = ScoreListResponse),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("session" = []))
)]
#[get("/scores")]
pub async fn list_scores(
    auth: SessionAuth,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    let scores = scores::list_scores(store.get_ref().as_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ScoreListResponse { scores }))
}
