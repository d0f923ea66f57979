//! Append-only operation log.
//!
//! Every mutating repository method appends one entry inside its own
//! transaction, audit-after-mutation. Entries are never updated or
//! deleted.

use chrono::Local;
use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::audit::AuditEntry};

/// Append one operation description using the caller's executor.
///
/// Takes any executor so it can participate in the caller's transaction.
pub async fn record<'e, E>(executor: E, operation: &str) -> AppResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let date = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    sqlx::query("INSERT INTO operation_log (date, operation) VALUES (?, ?)")
        .bind(date)
        .bind(operation)
        .execute(executor)
        .await?;
    Ok(())
}

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Sqlite>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get the log entries for a calendar date, oldest first
    pub async fn for_date(&self, date: &str) -> AppResult<Vec<AuditEntry>> {
        let entries = sqlx::query_as::<_, AuditEntry>(
            r#"
            SELECT date, operation FROM operation_log
            WHERE DATE(date) = DATE(?)
            ORDER BY date ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
