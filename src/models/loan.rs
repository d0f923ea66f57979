//! Loan (borrow record) model and related types
//!
//! Loan dates are stored as `%Y-%m-%d` text. A row is "open" while its
//! return date is null or empty; parsing of stored dates happens at the
//! point of use so that a malformed row degrades locally instead of
//! failing a whole request.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record joined with book metadata for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub record_id: i64,
    pub student_id: String,
    pub book_id: i64,
    pub borrow_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub renew: bool,
    pub book_name: String,
    pub author: String,
}
