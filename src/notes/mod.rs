mod dto;
pub mod handlers;
mod repo;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(handlers::list_notes))
        .route("/mynotes", get(handlers::list_my_notes))
        .route("/notes/add", post(handlers::create_note))
        .route(
            "/notes/:id",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
}
