use serde::{Deserialize, Serialize};

/// Request body for login. Fields are optional so presence is checked at
/// the boundary instead of failing JSON deserialization.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub student_id: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
}
