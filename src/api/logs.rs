//! Operation log endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::audit::AuditEntry, AppState};

use super::reports::DateQuery;

/// One day of the operation log
#[derive(Serialize, ToSchema)]
pub struct LogsResponse {
    pub date: String,
    pub logs: Vec<AuditEntry>,
}

/// View the operation log for a calendar date
#[utoipa::path(
    get,
    path = "/logs",
    tag = "logs",
    params(
        ("date" = String, Query, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "The day's log entries, oldest first", body = LogsResponse)
    )
)]
pub async fn view_logs(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<LogsResponse>> {
    let logs = state.services.repository.audit.for_date(&query.date).await?;

    Ok(Json(LogsResponse {
        date: query.date,
        logs,
    }))
}
