use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::notes::NoteInput;
use crate::application::use_cases::notes::create_note::CreateNote;
use crate::application::use_cases::notes::delete_note::DeleteNote;
use crate::application::use_cases::notes::get_note::GetNote;
use crate::application::use_cases::notes::list_notes::ListNotes;
use crate::application::use_cases::notes::update_note::UpdateNote;
use crate::bootstrap::app_context::AppContext;
use crate::domain::notes::note as domain;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Note> for Note {
    fn from(n: domain::Note) -> Self {
        Note {
            id: n.id,
            title: n.title,
            content: n.content,
            user_id: n.user_id,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteRequest {
    #[serde(default)]
    pub title: String,
    pub content: Option<String>,
}

impl From<NoteRequest> for NoteInput {
    fn from(r: NoteRequest) -> Self {
        NoteInput {
            title: r.title,
            content: r.content,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteMessageResponse {
    pub message: String,
    pub note: Note,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Note ids on the wire are unsigned 32-bit integers.
fn parse_note_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<u32>()
        .map(i64::from)
        .map_err(|_| ApiError::BadRequest("invalid note id".into()))
}

#[utoipa::path(post, path = "/api/notes", tag = "Notes", request_body = NoteRequest, responses(
    (status = 201, body = NoteMessageResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_note(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteMessageResponse>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.note_repo();
    let uc = CreateNote {
        repo: repo.as_ref(),
    };
    let note = uc.execute(user.id, &req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(NoteMessageResponse {
            message: "note created successfully".into(),
            note: note.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/notes", tag = "Notes", responses(
    (status = 200, body = NoteListResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn list_notes(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<NoteListResponse>, ApiError> {
    let repo = ctx.note_repo();
    let uc = ListNotes {
        repo: repo.as_ref(),
    };
    let notes = uc.execute(user.id).await.map_err(|e| {
        tracing::error!(user_id = user.id, error = ?e, "list_notes_failed");
        ApiError::Internal("failed to load notes")
    })?;
    Ok(Json(NoteListResponse {
        notes: notes.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = u32, Path, description = "Note ID")),
    responses(
        (status = 200, body = NoteResponse),
        (status = 400, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn get_note(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let id = parse_note_id(&id)?;
    let repo = ctx.note_repo();
    let uc = GetNote {
        repo: repo.as_ref(),
    };
    let note = uc.execute(id, user.id).await?;
    Ok(Json(NoteResponse { note: note.into() }))
}

#[utoipa::path(put, path = "/api/notes/{id}", tag = "Notes", request_body = NoteRequest,
    params(("id" = u32, Path, description = "Note ID")),
    responses(
        (status = 200, body = NoteMessageResponse),
        (status = 400, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn update_note(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<NoteMessageResponse>, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(req) = payload?;
    let repo = ctx.note_repo();
    let uc = UpdateNote {
        repo: repo.as_ref(),
    };
    let note = uc.execute(id, user.id, &req.into()).await?;
    Ok(Json(NoteMessageResponse {
        message: "note updated successfully".into(),
        note: note.into(),
    }))
}

#[utoipa::path(delete, path = "/api/notes/{id}", tag = "Notes",
    params(("id" = u32, Path, description = "Note ID")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, body = crate::presentation::http::error::ErrorBody),
        (status = 404, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn delete_note(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_note_id(&id)?;
    let repo = ctx.note_repo();
    let uc = DeleteNote {
        repo: repo.as_ref(),
    };
    uc.execute(id, user.id).await?;
    Ok(Json(MessageResponse {
        message: "note deleted successfully".into(),
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .with_state(ctx)
}
