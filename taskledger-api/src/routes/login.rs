/// Login endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "manager1", "password": "password123" }
/// ```
///
/// Responds with the user's ID and role; the client then sends that ID in the
/// `user_id` header. No token is issued.
///
/// # Errors
///
/// - `400 Bad Request`: missing username or password
/// - `401 Unauthorized`: no user with these credentials

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskledger_shared::{
    models::{user::Role, UserId},
    services::login::{login as check_credentials, LoginRequest},
};

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: UserId,
    pub role: Role,
    pub name: String,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = check_credentials(&state.services, req).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: outcome.user_id,
        role: outcome.role,
        name: outcome.name,
    }))
}
