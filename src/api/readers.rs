//! Reader record endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reader::{CreateReader, Reader, RegisterReader, UpdateReader},
    AppState,
};

use super::books::{SearchQuery, StatusResponse};

/// Reader list response
#[derive(Serialize, ToSchema)]
pub struct ReadersResponse {
    pub readers: Vec<Reader>,
}

/// Single reader response
#[derive(Serialize, ToSchema)]
pub struct ReaderResponse {
    pub information: Reader,
}

/// Registration response
#[derive(Serialize, ToSchema)]
pub struct ReaderCreatedResponse {
    pub status: String,
    pub message: String,
    pub reader_id: String,
}

/// Search readers (librarian)
#[utoipa::path(
    get,
    path = "/readers",
    tag = "readers",
    params(
        ("query" = String, Query, description = "Substring matched against id, name and contact fields")
    ),
    responses(
        (status = 200, description = "Matching readers", body = ReadersResponse)
    )
)]
pub async fn search_readers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ReadersResponse>> {
    let readers = state.services.readers.search(&query.query).await?;
    tracing::debug!(query = %query.query, count = readers.len(), "reader search");
    Ok(Json(ReadersResponse { readers }))
}

/// Self-registration with student id and password
#[utoipa::path(
    post,
    path = "/readers/register",
    tag = "readers",
    request_body = RegisterReader,
    responses(
        (status = 201, description = "Registration successful", body = ReaderCreatedResponse),
        (status = 400, description = "ID must be 9 digits"),
        (status = 409, description = "ID already has an account")
    )
)]
pub async fn register_reader(
    State(state): State<AppState>,
    Json(request): Json<RegisterReader>,
) -> AppResult<(StatusCode, Json<ReaderCreatedResponse>)> {
    let reader_id = state.services.readers.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReaderCreatedResponse {
            status: "success".to_string(),
            message: "Registration successful".to_string(),
            reader_id,
        }),
    ))
}

/// Create a full reader record (librarian)
#[utoipa::path(
    post,
    path = "/readers",
    tag = "readers",
    request_body = CreateReader,
    responses(
        (status = 201, description = "Reader added", body = ReaderCreatedResponse),
        (status = 400, description = "ID must be 9 digits"),
        (status = 409, description = "ID already has an account")
    )
)]
pub async fn create_reader(
    State(state): State<AppState>,
    Json(request): Json<CreateReader>,
) -> AppResult<(StatusCode, Json<ReaderCreatedResponse>)> {
    let reader_id = state.services.readers.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReaderCreatedResponse {
            status: "success".to_string(),
            message: "Added successfully".to_string(),
            reader_id,
        }),
    ))
}

/// Get a reader profile
#[utoipa::path(
    get,
    path = "/readers/{student_id}",
    tag = "readers",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Reader profile", body = ReaderResponse),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<ReaderResponse>> {
    let information = state.services.readers.get(&student_id).await?;
    Ok(Json(ReaderResponse { information }))
}

/// Update a reader record (librarian)
#[utoipa::path(
    put,
    path = "/readers/{student_id}",
    tag = "readers",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    request_body = UpdateReader,
    responses(
        (status = 200, description = "Reader updated", body = StatusResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn update_reader(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(update): Json<UpdateReader>,
) -> AppResult<Json<StatusResponse>> {
    state.services.readers.update(&student_id, update).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "Reader information updated successfully".to_string(),
    }))
}

/// Reader updating their own contact details
#[utoipa::path(
    put,
    path = "/readers/{student_id}/profile",
    tag = "readers",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    request_body = UpdateReader,
    responses(
        (status = 200, description = "Profile updated", body = StatusResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn update_own_profile(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(update): Json<UpdateReader>,
) -> AppResult<Json<StatusResponse>> {
    state.services.readers.update_own(&student_id, update).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "Reader information updated successfully".to_string(),
    }))
}

/// Delete a reader and their loan history (librarian)
#[utoipa::path(
    delete,
    path = "/readers/{student_id}",
    tag = "readers",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Reader deleted", body = StatusResponse),
        (status = 404, description = "Reader not found"),
        (status = 409, description = "Reader has active borrowings")
    )
)]
pub async fn delete_reader(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    state.services.readers.delete(&student_id).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: format!("Reader {} deleted successfully", student_id),
    }))
}
