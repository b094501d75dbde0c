//! Personal note endpoints.

use actix_web::{HttpResponse, delete, get, post, web};
use uuid::Uuid;

use crate::auth::SessionAuth;
use crate::error::AppResult;
use crate::models::{CreateNoteRequest, NoteListResponse, PersonalNote};
use crate::services::notes;
use crate::store::SharedStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_note)
        .service(list_notes)
        .service(delete_note);
}

#[utoipa::path(
    post,
    path = "/api/v1/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = PersonalNote),
        (status = 400, description = "Invalid title or body")
    ),
    security(("session" = []))
)]
#[post("/notes")]
pub async fn create_note(
    auth: SessionAuth,
    body: web::Json<CreateNoteRequest>,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    let note = notes::create_note(store.get_ref().as_ref(), auth.user_id, &body).await?;
    Ok(HttpResponse::Created().json(note))
}

#[utoipa::path(
    get,
    path = "/api/v1/notes",
    tag = "Notes",
    responses(
        (status = 200, description = "Own notes", body = NoteListResponse)
    ),
    security(("session" = []))
)]
#[get("/notes")]
pub async fn list_notes(
    auth: SessionAuth,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    let notes = notes::list_notes(store.get_ref().as_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(NoteListResponse { notes }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/notes/{id}",
    tag = "Notes",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "No such note owned by the caller")
    ),
    security(("session" = []))
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    store: web::Data<SharedStore>,
) -> AppResult<HttpResponse> {
    notes::delete_note(store.get_ref().as_ref(), auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
