//! Reporting endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::report::{ActivityCalendar, DailyReport},
    AppState,
};

/// Reference date query
#[derive(Deserialize, ToSchema)]
pub struct DateQuery {
    /// YYYY-MM-DD
    pub date: String,
}

/// Narrative reading report response
#[derive(Serialize, ToSchema)]
pub struct ReadingReportResponse {
    pub reports: Vec<String>,
}

/// Daily lending report for a reference date
#[utoipa::path(
    get,
    path = "/reports/daily",
    tag = "reports",
    params(
        ("date" = String, Query, description = "Reference date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Daily report", body = DailyReport),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DailyReport>> {
    let report = state.services.reports.daily(&query.date).await?;
    Ok(Json(report))
}

/// Borrow activity calendar for a reader
#[utoipa::path(
    get,
    path = "/readers/{student_id}/activity",
    tag = "reports",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Borrow counts per date", body = ActivityCalendar)
    )
)]
pub async fn activity_calendar(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<ActivityCalendar>> {
    let calendar = state.services.reports.activity_calendar(&student_id).await?;
    Ok(Json(calendar))
}

/// Narrative reading report for a reader
#[utoipa::path(
    get,
    path = "/readers/{student_id}/reading-report",
    tag = "reports",
    params(
        ("student_id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Up to two report sentences", body = ReadingReportResponse)
    )
)]
pub async fn reading_report(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<ReadingReportResponse>> {
    let reports = state.services.reports.reading_report(&student_id).await?;
    Ok(Json(ReadingReportResponse { reports }))
}
