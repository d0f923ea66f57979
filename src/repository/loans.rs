//! Loans repository: the borrow/return/renew lifecycle.
//!
//! Each operation runs its checks, writes and audit append inside one
//! transaction, and every state-machine precondition is expressed as a
//! conditional update: zero rows affected means the precondition failed,
//! so a concurrent request cannot slip between a check and its write.

use chrono::{Duration, NaiveDate};
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::loan::LoanDetails,
    repository::audit,
};

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get loan records for a reader joined with book metadata, newest first
    pub async fn loans_for_reader(&self, student_id: &str) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT
                br.record_id,
                br.student_id,
                br.book_id,
                br.borrow_date,
                br.due_date,
                br.return_date,
                br.renew,
                b.book_name,
                b.author
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.student_id = ?
            ORDER BY br.borrow_date DESC, br.record_id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Borrow a book: mark it unavailable and open a loan row.
    ///
    /// Fails NotFound if the reader or the book does not exist, Conflict
    /// if the reader already holds an open loan for it or if it is not
    /// available. The reader check runs inside the transaction so a
    /// concurrent reader deletion cannot leave a loan row behind.
    /// Returns the borrow and due dates.
    pub async fn borrow(
        &self,
        student_id: &str,
        book_id: i64,
        today: NaiveDate,
        loan_period_days: i64,
    ) -> AppResult<(String, String)> {
        let mut tx = self.pool.begin().await?;

        let reader_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM readers WHERE student_id = ?)")
                .bind(student_id)
                .fetch_one(&mut *tx)
                .await?;

        if !reader_exists {
            return Err(AppError::NotFound("Reader not found".to_string()));
        }

        let book: Option<bool> =
            sqlx::query_scalar("SELECT available FROM books WHERE book_id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        if book.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        // One open loan per (reader, book) pair
        let already_open: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrow_records
                WHERE student_id = ? AND book_id = ?
                  AND (return_date IS NULL OR return_date = '')
            )
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_open {
            return Err(AppError::Conflict(
                "This book is already on loan to this reader".to_string(),
            ));
        }

        let updated = sqlx::query("UPDATE books SET available = 0 WHERE book_id = ? AND available = 1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Book is not available for borrowing".to_string(),
            ));
        }

        let borrow_date = today.format(DATE_FMT).to_string();
        let due_date = (today + Duration::days(loan_period_days))
            .format(DATE_FMT)
            .to_string();

        sqlx::query(
            r#"
            INSERT INTO borrow_records (student_id, book_id, borrow_date, due_date, return_date, renew)
            VALUES (?, ?, ?, ?, NULL, 0)
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .bind(&borrow_date)
        .bind(&due_date)
        .execute(&mut *tx)
        .await?;

        audit::record(
            &mut *tx,
            &format!("Student {} borrowed book {}", student_id, book_id),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(student_id, book_id, %due_date, "book borrowed");
        Ok((borrow_date, due_date))
    }

    /// Return a book: close the open loan row and mark the book available.
    ///
    /// Fails NotFound if no open loan exists for the pair. Returns the
    /// return date.
    pub async fn return_book(
        &self,
        student_id: &str,
        book_id: i64,
        today: NaiveDate,
    ) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;

        let return_date = today.format(DATE_FMT).to_string();

        let closed = sqlx::query(
            r#"
            UPDATE borrow_records
            SET return_date = ?
            WHERE student_id = ? AND book_id = ?
              AND (return_date IS NULL OR return_date = '')
            "#,
        )
        .bind(&return_date)
        .bind(student_id)
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if closed.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Borrow record not found or already returned".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET available = 1 WHERE book_id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        audit::record(
            &mut *tx,
            &format!("Student {} returned book {}", student_id, book_id),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(student_id, book_id, %return_date, "book returned");
        Ok(return_date)
    }

    /// Renew a loan once: extend the due date and set the renew flag.
    ///
    /// The new due date is the stored due date plus the extension; a stored
    /// due date that does not parse falls back to today plus the extension
    /// and is never surfaced to the caller. Fails Conflict if no open,
    /// unrenewed loan exists for the pair. Returns the new due date.
    pub async fn renew(
        &self,
        student_id: &str,
        book_id: i64,
        today: NaiveDate,
        extension_days: i64,
    ) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;

        let due_date: Option<String> = sqlx::query_scalar(
            r#"
            SELECT due_date FROM borrow_records
            WHERE student_id = ? AND book_id = ?
              AND (return_date IS NULL OR return_date = '')
              AND renew = 0
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(due_date) = due_date else {
            return Err(AppError::Conflict("This book can not be renewed".to_string()));
        };

        let new_due = match NaiveDate::parse_from_str(&due_date, DATE_FMT) {
            Ok(d) => d + Duration::days(extension_days),
            Err(_) => {
                tracing::warn!(student_id, book_id, %due_date, "unparseable due date, extending from today");
                today + Duration::days(extension_days)
            }
        };
        let new_due = new_due.format(DATE_FMT).to_string();

        let renewed = sqlx::query(
            r#"
            UPDATE borrow_records
            SET renew = 1, due_date = ?
            WHERE student_id = ? AND book_id = ?
              AND (return_date IS NULL OR return_date = '')
              AND renew = 0
            "#,
        )
        .bind(&new_due)
        .bind(student_id)
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if renewed.rows_affected() == 0 {
            return Err(AppError::Conflict("This book can not be renewed".to_string()));
        }

        audit::record(
            &mut *tx,
            &format!("Student {} renewed book {}", student_id, book_id),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(student_id, book_id, %new_due, "loan renewed");
        Ok(new_due)
    }
}
