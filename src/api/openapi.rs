//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::{auth, books, health, loans, logs, readers, reports, staff};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Books
        books::search_books,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Readers
        readers::search_readers,
        readers::register_reader,
        readers::create_reader,
        readers::get_reader,
        readers::update_reader,
        readers::update_own_profile,
        readers::delete_reader,
        // Loans
        loans::get_reader_loans,
        loans::borrow_book,
        loans::return_book,
        loans::renew_book,
        // Staff
        staff::search_staff,
        staff::create_staff,
        staff::get_staff,
        staff::update_staff,
        staff::delete_staff,
        // Reports
        reports::daily_report,
        reports::activity_calendar,
        reports::reading_report,
        // Logs
        logs::view_logs,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Books
            books::BooksResponse,
            books::StatusResponse,
            books::BookCreatedResponse,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Readers
            readers::ReadersResponse,
            readers::ReaderResponse,
            readers::ReaderCreatedResponse,
            crate::models::reader::Reader,
            crate::models::reader::RegisterReader,
            crate::models::reader::CreateReader,
            crate::models::reader::UpdateReader,
            // Loans
            loans::LoanRequest,
            loans::BorrowResponse,
            loans::ReturnResponse,
            loans::RenewResponse,
            loans::BorrowingsResponse,
            crate::models::loan::LoanDetails,
            // Staff
            staff::StaffListResponse,
            staff::StaffResponse,
            staff::StaffCreatedResponse,
            crate::models::staff::StaffRole,
            crate::models::staff::StaffMember,
            crate::models::staff::CreateStaff,
            crate::models::staff::UpdateStaff,
            // Reports
            reports::ReadingReportResponse,
            crate::models::report::ReportRow,
            crate::models::report::ReportSection,
            crate::models::report::DailyReport,
            crate::models::report::ActivityCalendar,
            // Logs
            logs::LogsResponse,
            crate::models::audit::AuditEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "readers", description = "Reader record management"),
        (name = "loans", description = "Lending operations"),
        (name = "staff", description = "Staff record management"),
        (name = "reports", description = "Reports over the loan ledger"),
        (name = "logs", description = "Operation log")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
