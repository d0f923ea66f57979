//! Reporting service: daily report, activity calendar and the narrative
//! reading report.
//!
//! All reporting is read-only over the loan ledger. Rows whose stored
//! dates fail to parse are skipped locally and never fail a request.

use chrono::{Datelike, Duration, Local, NaiveDate};
use sqlx::Row;
use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult},
    models::report::{ActivityCalendar, DailyReport, ReadingHistoryRow, ReportRow, ReportSection},
    repository::Repository,
};

const DATE_FMT: &str = "%Y-%m-%d";
const FALLBACK_SENTENCE: &str = "please read more books";
const ENGAGEMENT_WINDOW_DAYS: i64 = 90;
const MAX_LISTED_TITLES: usize = 5;

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Daily report for a reference date: open loans, loans opened and
    /// closed on the date, and overdue open loans (a subset of the open
    /// set). Idempotent for a fixed date and ledger.
    pub async fn daily(&self, date: &str) -> AppResult<DailyReport> {
        NaiveDate::parse_from_str(date, DATE_FMT)
            .map_err(|_| AppError::Validation("Invalid date, expected YYYY-MM-DD".to_string()))?;

        let pool = &self.repository.pool;

        let open_loans = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT b.book_name, b.author, br.student_id, br.borrow_date, br.due_date, br.return_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.return_date IS NULL OR br.return_date = ''
            "#,
        )
        .fetch_all(pool)
        .await?;

        let borrowed = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT b.book_name, b.author, br.student_id, br.borrow_date, br.due_date, br.return_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.borrow_date = ?
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        let returned = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT b.book_name, b.author, br.student_id, br.borrow_date, br.due_date, br.return_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.return_date = ?
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        // Dates are %Y-%m-%d text, so < compares chronologically
        let overdue = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT b.book_name, b.author, br.student_id, br.borrow_date, br.due_date, br.return_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE (br.return_date IS NULL OR br.return_date = '')
              AND br.due_date < ?
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(DailyReport {
            date: date.to_string(),
            open_loans: section(open_loans),
            borrowed: section(borrowed),
            returned: section(returned),
            overdue: section(overdue),
        })
    }

    /// Borrow activity for a reader, counted per borrow date
    pub async fn activity_calendar(&self, student_id: &str) -> AppResult<ActivityCalendar> {
        let rows = sqlx::query(
            r#"
            SELECT borrow_date, COUNT(*) as activity_count
            FROM borrow_records
            WHERE student_id = ?
            GROUP BY borrow_date
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.repository.pool)
        .await?;

        let mut activity_data = BTreeMap::new();
        for row in rows {
            activity_data.insert(
                row.get::<String, _>("borrow_date"),
                row.get::<i64, _>("activity_count"),
            );
        }

        Ok(ActivityCalendar {
            student_id: student_id.to_string(),
            activity_data,
        })
    }

    /// Up to two narrative sentences about a reader's borrowing habits
    pub async fn reading_report(&self, student_id: &str) -> AppResult<Vec<String>> {
        let rows = sqlx::query_as::<_, ReadingHistoryRow>(
            r#"
            SELECT br.borrow_date, br.return_date, b.book_name
            FROM borrow_records br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.student_id = ?
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(compose_reading_report(&rows, Local::now().date_naive()))
    }
}

fn section(detail: Vec<ReportRow>) -> ReportSection {
    ReportSection {
        count: detail.len() as i64,
        detail,
    }
}

/// Build the narrative sentences from a reader's loan history.
///
/// Rows must be ordered by borrow date descending; on a tie for the
/// busiest day the most recent one wins because groups keep their
/// first-encounter order.
fn compose_reading_report(rows: &[ReadingHistoryRow], today: NaiveDate) -> Vec<String> {
    if rows.is_empty() {
        return vec![FALLBACK_SENTENCE.to_string()];
    }

    let mut day_groups: Vec<(NaiveDate, Vec<&str>)> = Vec::new();
    for row in rows {
        let Ok(date) = NaiveDate::parse_from_str(&row.borrow_date, DATE_FMT) else {
            continue;
        };
        match day_groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, books)) => books.push(&row.book_name),
            None => day_groups.push((date, vec![&row.book_name])),
        }
    }

    let mut reports = Vec::new();

    // Template 1: the day with the most checkouts
    let mut busiest: Option<&(NaiveDate, Vec<&str>)> = None;
    for group in &day_groups {
        match busiest {
            Some(best) if best.1.len() >= group.1.len() => {}
            _ => busiest = Some(group),
        }
    }
    if let Some((day, books)) = busiest {
        if books.len() >= 2 {
            let listed = books
                .iter()
                .take(MAX_LISTED_TITLES)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            reports.push(format!(
                "On {}, you checked out {} books at once — {}. Maybe they sparked a few new ideas.",
                format_month_day(*day),
                books.len(),
                listed
            ));
        }
    }

    // Template 2: the title held longest within the last three months
    let window_start = today - Duration::days(ENGAGEMENT_WINDOW_DAYS);
    let mut engagement: Vec<(&str, i64)> = Vec::new();
    for row in rows {
        let Ok(borrowed) = NaiveDate::parse_from_str(&row.borrow_date, DATE_FMT) else {
            continue;
        };
        if borrowed < window_start {
            continue;
        }
        let returned = row
            .return_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FMT).ok())
            .unwrap_or(today);
        let days_held = (returned - borrowed).num_days().max(1);
        match engagement.iter_mut().find(|(name, _)| *name == row.book_name) {
            Some((_, total)) => *total += days_held,
            None => engagement.push((&row.book_name, days_held)),
        }
    }
    let mut favorite: Option<(&str, i64)> = None;
    for &(name, total) in &engagement {
        match favorite {
            Some((_, best)) if best >= total => {}
            _ => favorite = Some((name, total)),
        }
    }
    if let Some((name, _)) = favorite {
        reports.push(format!(
            "Over the past three months, the book you spent the most time with was {} — clearly a favorite in your recent reading history.",
            name
        ));
    }

    if reports.is_empty() {
        return vec![FALLBACK_SENTENCE.to_string()];
    }
    reports.truncate(2);
    reports
}

/// Render a date as e.g. "January 3rd"
fn format_month_day(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{} {}{}", date.format("%B"), day, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(borrow: &str, ret: Option<&str>, name: &str) -> ReadingHistoryRow {
        ReadingHistoryRow {
            borrow_date: borrow.to_string(),
            return_date: ret.map(|s| s.to_string()),
            book_name: name.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FMT).unwrap()
    }

    #[test]
    fn no_loans_yields_fallback() {
        assert_eq!(
            compose_reading_report(&[], date("2024-06-01")),
            vec![FALLBACK_SENTENCE.to_string()]
        );
    }

    #[test]
    fn multi_checkout_day_lists_titles_and_count() {
        let rows = vec![
            row("2024-01-01", Some("2024-01-10"), "bookA"),
            row("2024-01-01", Some("2024-01-10"), "bookB"),
        ];
        // Well past the engagement window, so only the first template fires
        let reports = compose_reading_report(&rows, date("2024-09-01"));
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("2 books"));
        assert!(reports[0].contains("bookA"));
        assert!(reports[0].contains("bookB"));
        assert!(reports[0].starts_with("On January 1st"));
    }

    #[test]
    fn single_checkouts_inside_window_yield_engagement_only() {
        let rows = vec![
            row("2024-05-20", Some("2024-05-25"), "short read"),
            row("2024-05-01", Some("2024-05-30"), "long read"),
        ];
        let reports = compose_reading_report(&rows, date("2024-06-01"));
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("long read"));
    }

    #[test]
    fn open_loan_counts_until_today() {
        let rows = vec![
            row("2024-05-30", Some("2024-05-31"), "returned quickly"),
            row("2024-05-01", None, "still out"),
        ];
        let reports = compose_reading_report(&rows, date("2024-06-01"));
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("still out"));
    }

    #[test]
    fn stale_loans_yield_fallback() {
        let rows = vec![row("2020-01-01", Some("2020-01-05"), "old book")];
        let reports = compose_reading_report(&rows, date("2024-06-01"));
        assert_eq!(reports, vec![FALLBACK_SENTENCE.to_string()]);
    }

    #[test]
    fn busiest_day_tie_prefers_most_recent() {
        let rows = vec![
            row("2024-03-02", Some("2024-03-10"), "newer1"),
            row("2024-03-02", Some("2024-03-10"), "newer2"),
            row("2024-03-01", Some("2024-03-10"), "older1"),
            row("2024-03-01", Some("2024-03-10"), "older2"),
        ];
        let reports = compose_reading_report(&rows, date("2025-01-01"));
        assert!(reports[0].starts_with("On March 2nd"));
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let rows = vec![
            row("not-a-date", None, "ghost"),
            row("2024-01-01", Some("2024-01-02"), "bookA"),
            row("2024-01-01", Some("2024-01-02"), "bookB"),
        ];
        let reports = compose_reading_report(&rows, date("2024-09-01"));
        assert!(reports[0].contains("2 books"));
        assert!(!reports[0].contains("ghost"));
    }

    #[test]
    fn at_most_five_titles_listed() {
        let rows: Vec<_> = (0..7)
            .map(|i| row("2024-01-01", None, &format!("book{}", i)))
            .collect();
        let reports = compose_reading_report(&rows, date("2024-09-01"));
        assert!(reports[0].contains("7 books"));
        assert!(reports[0].contains("book4"));
        assert!(!reports[0].contains("book5"));
    }

    #[test]
    fn month_day_suffixes() {
        assert_eq!(format_month_day(date("2024-01-01")), "January 1st");
        assert_eq!(format_month_day(date("2024-02-02")), "February 2nd");
        assert_eq!(format_month_day(date("2024-03-03")), "March 3rd");
        assert_eq!(format_month_day(date("2024-04-11")), "April 11th");
        assert_eq!(format_month_day(date("2024-05-21")), "May 21st");
    }
}
