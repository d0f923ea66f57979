//! Audit log entry model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One append-only operation log entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditEntry {
    /// Timestamp, `%Y-%m-%d %H:%M:%S`
    pub date: String,
    /// Human-readable operation description
    pub operation: String,
}
