//! Login endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// student_id for readers, admin_id for staff
    pub id: String,
    pub password: String,
    /// 'reader', 'librarian' or 'director'
    pub identity: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub user_id: String,
    pub full_name: String,
    pub role: String,
}

/// Verify credentials for a role
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown identity type"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    tracing::info!(identity = %request.identity, id = %request.id, "login attempt");

    let outcome = state
        .services
        .auth
        .login(&request.identity, &request.id, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        status: "success".to_string(),
        message: format!(
            "Login successful for {} with ID {}",
            outcome.role, outcome.user_id
        ),
        user_id: outcome.user_id,
        full_name: outcome.full_name,
        role: outcome.role,
    }))
}
