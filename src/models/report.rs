//! Reporting projections over the loan ledger

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Row-level detail for the daily report
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReportRow {
    pub book_name: String,
    pub author: String,
    pub student_id: String,
    pub borrow_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
}

/// One count + detail set of the daily report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSection {
    pub count: i64,
    pub detail: Vec<ReportRow>,
}

/// Daily report for a reference date: open loans, loans opened and closed
/// on the date, and overdue open loans
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub date: String,
    pub open_loans: ReportSection,
    pub borrowed: ReportSection,
    pub returned: ReportSection,
    pub overdue: ReportSection,
}

/// Borrow activity counted per date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityCalendar {
    pub student_id: String,
    /// borrow date -> number of loans opened that day
    pub activity_data: BTreeMap<String, i64>,
}

/// Input row for the narrative reading report
#[derive(Debug, Clone, FromRow)]
pub struct ReadingHistoryRow {
    pub borrow_date: String,
    pub return_date: Option<String>,
    pub book_name: String,
}
