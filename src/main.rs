//! Libris Server - Library Management System
//!
//! A Rust REST API server for library management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("libris_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let connect_options = SqliteConnectOptions::from_str(&config.database.url)
        .expect("Invalid database URL")
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.lending.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        // Books (catalog)
        .route("/books", get(api::books::search_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:book_id", put(api::books::update_book))
        .route("/books/:book_id", delete(api::books::delete_book))
        // Readers
        .route("/readers", get(api::readers::search_readers))
        .route("/readers", post(api::readers::create_reader))
        .route("/readers/register", post(api::readers::register_reader))
        .route("/readers/:student_id", get(api::readers::get_reader))
        .route("/readers/:student_id", put(api::readers::update_reader))
        .route("/readers/:student_id", delete(api::readers::delete_reader))
        .route(
            "/readers/:student_id/profile",
            put(api::readers::update_own_profile),
        )
        .route(
            "/readers/:student_id/loans",
            get(api::loans::get_reader_loans),
        )
        .route(
            "/readers/:student_id/activity",
            get(api::reports::activity_calendar),
        )
        .route(
            "/readers/:student_id/reading-report",
            get(api::reports::reading_report),
        )
        // Loans
        .route("/loans/borrow", post(api::loans::borrow_book))
        .route("/loans/return", post(api::loans::return_book))
        .route("/loans/renew", post(api::loans::renew_book))
        // Staff
        .route("/staff", get(api::staff::search_staff))
        .route("/staff", post(api::staff::create_staff))
        .route("/staff/:admin_id", get(api::staff::get_staff))
        .route("/staff/:admin_id", put(api::staff::update_staff))
        .route("/staff/:admin_id", delete(api::staff::delete_staff))
        // Reports
        .route("/reports/daily", get(api::reports::daily_report))
        // Operation log
        .route("/logs", get(api::logs::view_logs))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = Router::new().route(
        "/api-docs/openapi.json",
        get(api::openapi::serve_openapi),
    );

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
