//! Staff record endpoints (director)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::staff::{CreateStaff, StaffMember, StaffRole, UpdateStaff},
    AppState,
};

use super::books::StatusResponse;

/// Staff search query
#[derive(Deserialize, ToSchema)]
pub struct StaffSearchQuery {
    pub query: Option<String>,
}

/// Role selector for profile lookups
#[derive(Deserialize, ToSchema)]
pub struct RoleQuery {
    pub role: String,
}

/// Staff list response
#[derive(Serialize, ToSchema)]
pub struct StaffListResponse {
    pub librarians: Vec<StaffMember>,
}

/// Single staff member response
#[derive(Serialize, ToSchema)]
pub struct StaffResponse {
    pub information: StaffMember,
}

/// Staff creation response
#[derive(Serialize, ToSchema)]
pub struct StaffCreatedResponse {
    pub status: String,
    pub message: String,
    pub admin_id: i64,
}

/// Search or list librarians
#[utoipa::path(
    get,
    path = "/staff",
    tag = "staff",
    params(
        ("query" = Option<String>, Query, description = "Substring matched against id, name and contact fields; omit to list all")
    ),
    responses(
        (status = 200, description = "Matching librarians", body = StaffListResponse)
    )
)]
pub async fn search_staff(
    State(state): State<AppState>,
    Query(query): Query<StaffSearchQuery>,
) -> AppResult<Json<StaffListResponse>> {
    let librarians = match query.query {
        Some(ref q) => state.services.staff.search(q).await?,
        None => state.services.staff.list().await?,
    };
    Ok(Json(StaffListResponse { librarians }))
}

/// Add a librarian
#[utoipa::path(
    post,
    path = "/staff",
    tag = "staff",
    request_body = CreateStaff,
    responses(
        (status = 201, description = "Librarian added", body = StaffCreatedResponse)
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaff>,
) -> AppResult<(StatusCode, Json<StaffCreatedResponse>)> {
    let admin_id = state.services.staff.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(StaffCreatedResponse {
            status: "success".to_string(),
            message: "Added successfully".to_string(),
            admin_id,
        }),
    ))
}

/// Get a librarian or director profile
#[utoipa::path(
    get,
    path = "/staff/{admin_id}",
    tag = "staff",
    params(
        ("admin_id" = i64, Path, description = "Admin ID"),
        ("role" = String, Query, description = "'librarian' or 'director'")
    ),
    responses(
        (status = 200, description = "Staff profile", body = StaffResponse),
        (status = 400, description = "Invalid role"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn get_staff(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<StaffResponse>> {
    let role = StaffRole::parse(&query.role)?;
    let information = state.services.staff.get(role, admin_id).await?;
    Ok(Json(StaffResponse { information }))
}

/// Update a librarian or director profile
#[utoipa::path(
    put,
    path = "/staff/{admin_id}",
    tag = "staff",
    params(
        ("admin_id" = i64, Path, description = "Admin ID")
    ),
    request_body = UpdateStaff,
    responses(
        (status = 200, description = "Staff member updated", body = StatusResponse),
        (status = 400, description = "Invalid role or no fields to update"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
    Json(update): Json<UpdateStaff>,
) -> AppResult<Json<StatusResponse>> {
    let role = update.role;
    state.services.staff.update(admin_id, update).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: format!("{} information updated successfully", role.as_str()),
    }))
}

/// Delete a librarian
#[utoipa::path(
    delete,
    path = "/staff/{admin_id}",
    tag = "staff",
    params(
        ("admin_id" = i64, Path, description = "Admin ID")
    ),
    responses(
        (status = 200, description = "Librarian deleted", body = StatusResponse),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
) -> AppResult<Json<StatusResponse>> {
    state.services.staff.delete(admin_id).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: format!("librarian {} deleted successfully", admin_id),
    }))
}
