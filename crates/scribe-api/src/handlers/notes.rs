//! Note CRUD handlers mounted under `/api/notes`.
//!
//! Each handler performs exactly one repository call and produces exactly
//! one response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use scribe_core::{CreateNoteRequest, DeletedNote, PatchNoteRequest, UpdateNoteRequest};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    /// Case-insensitive substring filter over title and content.
    pub search: Option<String>,
}

/// `GET /api/notes?search=<q>`
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.db.notes.list(query.search.as_deref()).await?;
    Ok(Json(notes))
}

/// `GET /api/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(&id).await?;
    Ok(Json(note))
}

/// `POST /api/notes`
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let note = state.db.notes.insert(req).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PUT /api/notes/:id`
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let note = state.db.notes.update(&id, req).await?;
    Ok(Json(note))
}

/// `PATCH /api/notes/:id`
pub async fn patch_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PatchNoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let note = state.db.notes.patch(&id, req).await?;
    Ok(Json(note))
}

/// `DELETE /api/notes/:id`
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.delete(&id).await?;
    Ok(Json(DeletedNote::new(note)))
}
