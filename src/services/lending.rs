//! Lending service: the borrow/return/renew state machine.
//!
//! Per (reader, book) pair a loan is either absent, open, open-renewed or
//! closed. Borrow opens a loan and flips the book unavailable, renew
//! extends an open loan exactly once, return closes it and flips the book
//! back. The repository performs each transition atomically; this layer
//! injects today's date and the configured durations.

use chrono::Local;

use crate::{
    config::LendingConfig, error::AppResult, models::loan::LoanDetails,
    repository::Repository,
};

/// Outcome of a successful borrow
pub struct BorrowOutcome {
    pub borrow_date: String,
    pub due_date: String,
}

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    config: LendingConfig,
}

impl LendingService {
    pub fn new(repository: Repository, config: LendingConfig) -> Self {
        Self { repository, config }
    }

    /// Get a reader's loan records, newest first
    pub async fn loans_for_reader(&self, student_id: &str) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.loans_for_reader(student_id).await
    }

    /// Borrow a book for a reader
    pub async fn borrow(&self, student_id: &str, book_id: i64) -> AppResult<BorrowOutcome> {
        let today = Local::now().date_naive();
        let (borrow_date, due_date) = self
            .repository
            .loans
            .borrow(student_id, book_id, today, self.config.loan_period_days)
            .await?;

        Ok(BorrowOutcome {
            borrow_date,
            due_date,
        })
    }

    /// Return a borrowed book; yields the return date
    pub async fn return_book(&self, student_id: &str, book_id: i64) -> AppResult<String> {
        let today = Local::now().date_naive();
        self.repository
            .loans
            .return_book(student_id, book_id, today)
            .await
    }

    /// Renew an open loan once; yields the new due date
    pub async fn renew(&self, student_id: &str, book_id: i64) -> AppResult<String> {
        let today = Local::now().date_naive();
        self.repository
            .loans
            .renew(
                student_id,
                book_id,
                today,
                self.config.renewal_extension_days,
            )
            .await
    }
}
