//! Lending endpoints: borrow, return, renew and loan listing

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::loan::LoanDetails, AppState};

/// Borrow/return/renew request, identifying the loan by its pair
#[derive(Deserialize, ToSchema)]
pub struct LoanRequest {
    pub student_id: String,
    pub book_id: i64,
}

/// Borrow response with the computed dates
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub status: String,
    pub message: String,
    pub borrow_date: String,
    pub due_date: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub status: String,
    pub message: String,
    pub return_date: String,
}

/// Renew response with the extended due date
#[derive(Serialize, ToSchema)]
pub struct RenewResponse {
    pub status: String,
    pub message: String,
    pub new_due_date: String,
}

/// Loan list response
#[derive(Serialize, ToSchema)]
pub struct BorrowingsResponse {
    pub borrowings: Vec<LoanDetails>,
}

/// Get a reader's borrow records, newest first
#[utoipa::path(
    get,
    path = "/readers/{student_id}/loans",
    tag = "loans",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The reader's loans", body = BorrowingsResponse)
    )
)]
pub async fn get_reader_loans(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<BorrowingsResponse>> {
    let borrowings = state.services.lending.loans_for_reader(&student_id).await?;
    Ok(Json(BorrowingsResponse { borrowings }))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans/borrow",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 404, description = "Reader or book not found"),
        (status = 409, description = "Book not available or already on loan to this reader")
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let outcome = state
        .services
        .lending
        .borrow(&request.student_id, request.book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            status: "success".to_string(),
            message: format!("Successfully borrowed book {}", request.book_id),
            borrow_date: outcome.borrow_date,
            due_date: outcome.due_date,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "No open loan for this reader and book")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<ReturnResponse>> {
    let return_date = state
        .services
        .lending
        .return_book(&request.student_id, request.book_id)
        .await?;

    Ok(Json(ReturnResponse {
        status: "success".to_string(),
        message: format!("Successfully returned book {}", request.book_id),
        return_date,
    }))
}

/// Renew an open loan (once per loan)
#[utoipa::path(
    post,
    path = "/loans/renew",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Loan renewed", body = RenewResponse),
        (status = 409, description = "No open, unrenewed loan for this reader and book")
    )
)]
pub async fn renew_book(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<RenewResponse>> {
    let new_due_date = state
        .services
        .lending
        .renew(&request.student_id, request.book_id)
        .await?;

    Ok(Json(RenewResponse {
        status: "success".to_string(),
        message: format!("Successfully renewed book {}", request.book_id),
        new_due_date,
    }))
}
