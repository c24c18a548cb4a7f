use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::{ApiError, MessageResponse},
    state::AppState,
};

use super::dto::{CreateNoteRequest, CreatedNoteResponse, NoteFilters, UpdateNoteRequest};
use super::repo::Note;

#[instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    Query(filters): Query<NoteFilters>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = Note::list(&state.db, &filters).await?;
    Ok(Json(notes))
}

#[instrument(skip(state))]
pub async fn list_my_notes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filters): Query<NoteFilters>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = Note::list_mine(&state.db, user.id, &filters).await?;
    Ok(Json(notes))
}

#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = Note::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("note not found".into()))?;
    Ok(Json(note))
}

#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreatedNoteResponse>), ApiError> {
    let note = payload.validate()?;
    let note_id = Note::create(&state.db, user.id, note).await?;
    info!(note_id, user_id = user.id, "note created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedNoteResponse {
            message: "note created",
            note_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = payload.validate()?;
    let affected = Note::update(&state.db, id, user.id, patch).await?;
    if affected == 0 {
        // missing id and foreign owner are reported identically
        return Err(ApiError::NotFound("note not found".into()));
    }
    info!(note_id = id, user_id = user.id, "note updated");
    Ok(Json(MessageResponse {
        message: "note updated",
    }))
}

#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Note::delete(&state.db, id, user.id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("note not found".into()));
    }
    info!(note_id = id, user_id = user.id, "note deleted");
    Ok(Json(MessageResponse {
        message: "note deleted",
    }))
}
