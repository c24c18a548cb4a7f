use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        jwt::JwtKeys,
        password,
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

/// Demo account: always valid, never touches the database.
const DEMO_STUDENT_ID: &str = "24041225";
const DEMO_PASSWORD: &str = "apple123";
const DEMO_USER_ID: i64 = 0;

fn is_valid_student_id(student_id: &str) -> bool {
    lazy_static! {
        static ref STUDENT_ID_RE: Regex = Regex::new(r"^[0-9]{4,16}$").unwrap();
    }
    STUDENT_ID_RE.is_match(student_id)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let student_id = payload
        .student_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("student_id is required".into()))?;
    let password = payload
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("password is required".into()))?;

    if !is_valid_student_id(student_id) {
        warn!(student_id = %student_id, "malformed student id");
        return Err(ApiError::Validation("student_id must be numeric".into()));
    }

    let keys = JwtKeys::from_ref(&state);

    if student_id == DEMO_STUDENT_ID && password == DEMO_PASSWORD {
        let token = keys.sign(DEMO_USER_ID, DEMO_STUDENT_ID)?;
        info!("demo login");
        return Ok(Json(LoginResponse {
            token,
            user_id: DEMO_USER_ID,
        }));
    }

    let user = User::find_by_student_id(&state.db, student_id)
        .await?
        .ok_or_else(|| {
            warn!(student_id = %student_id, "login unknown student");
            ApiError::NotFound("student not found".into())
        })?;

    let ok = password::verify_password(password, &user.password_hash)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredential("invalid credentials".into()));
    }

    let token = keys.sign(user.id, &user.student_id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}
