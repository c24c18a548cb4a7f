use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::{ApiError, MessageResponse},
    state::AppState,
};

use super::dto::{CreateEventRequest, CreatedEventResponse, UpdateEventRequest};
use super::repo::Event;

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = Event::list(&state.db).await?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, ApiError> {
    let event = Event::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("event not found".into()))?;
    Ok(Json(event))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreatedEventResponse>), ApiError> {
    let event = payload.validate()?;
    let event_id = Event::create(&state.db, user.id, event).await?;
    info!(event_id, user_id = user.id, "event created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedEventResponse {
            message: "event created",
            event_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Event::update(&state.db, id, user.id, payload).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("event not found".into()));
    }
    info!(event_id = id, user_id = user.id, "event updated");
    Ok(Json(MessageResponse {
        message: "event updated",
    }))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Event::delete(&state.db, id, user.id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("event not found".into()));
    }
    info!(event_id = id, user_id = user.id, "event deleted");
    Ok(Json(MessageResponse {
        message: "event deleted",
    }))
}
