//! API integration tests
//!
//! These run against a live server on localhost:8080 with a fresh
//! database. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a reader and return the student id used
async fn register_reader(client: &Client, student_id: &str) -> String {
    let response = client
        .post(format!("{}/readers/register", BASE_URL))
        .json(&json!({
            "student_id": student_id,
            "password": "testpass"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    student_id.to_string()
}

/// Add a book and return its allocated id
async fn add_book(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "book_name": name,
            "author": "Test Author"
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["book_id"].as_i64().expect("No book ID")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000001").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "id": student_id,
            "password": "testpass",
            "identity": "reader"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["role"], "reader");
    assert_eq!(body["user_id"], student_id);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "id": "999999999",
            "password": "wrong",
            "identity": "reader"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_login_unknown_identity() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "id": "1",
            "password": "x",
            "identity": "janitor"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_short_id() {
    let client = Client::new();

    let response = client
        .post(format!("{}/readers/register", BASE_URL))
        .json(&json!({
            "student_id": "12345",
            "password": "testpass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_conflicts() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000002").await;

    let response = client
        .post(format!("{}/readers/register", BASE_URL))
        .json(&json!({
            "student_id": student_id,
            "password": "otherpass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_search_and_delete_book() {
    let client = Client::new();
    let book_id = add_book(&client, "Integration Test Book").await;

    // Search by name
    let response = client
        .get(format!("{}/books?query=Integration Test Book", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("No books array");
    assert!(books.iter().any(|b| b["book_id"] == json!(book_id)));

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // Gone now
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_flow() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000003").await;
    let book_id = add_book(&client, "Borrow Flow Book").await;

    // Borrow
    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["borrow_date"].is_string());
    assert!(body["due_date"].is_string());

    // Book now unavailable: borrowing it again for anyone conflicts
    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // The loan shows up for the reader
    let response = client
        .get(format!("{}/readers/{}/loans", BASE_URL, student_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let borrowings = body["borrowings"].as_array().expect("No borrowings array");
    assert!(borrowings.iter().any(|l| l["book_id"] == json!(book_id)));

    // Return
    let response = client
        .post(format!("{}/loans/return", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["return_date"].is_string());

    // Returning again finds no open loan
    let response = client
        .post(format!("{}/loans/return", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_renew_only_once() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000004").await;
    let book_id = add_book(&client, "Renew Flow Book").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let due_date = body["due_date"].as_str().expect("No due date").to_string();

    // First renewal extends the due date by exactly the configured 10 days
    let response = client
        .post(format!("{}/loans/renew", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let new_due = body["new_due_date"].as_str().expect("No new due date");
    let expected = chrono::NaiveDate::parse_from_str(&due_date, "%Y-%m-%d")
        .expect("Unparseable due date")
        + chrono::Duration::days(10);
    assert_eq!(new_due, expected.format("%Y-%m-%d").to_string());

    // Second renewal is rejected
    let response = client
        .post(format!("{}/loans/renew", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_borrow_unregistered_reader() {
    let client = Client::new();
    let book_id = add_book(&client, "Unclaimed Book").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": "000000000", "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_nonexistent_book() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000005").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": 999999 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_reader_with_open_loan_conflicts() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000006").await;
    let book_id = add_book(&client, "Held Book").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/readers/{}", BASE_URL, student_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_daily_report() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reports/daily?date=2024-06-01", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["date"], "2024-06-01");
    assert!(body["open_loans"]["count"].is_number());
    assert!(body["borrowed"]["detail"].is_array());
    assert!(body["returned"]["count"].is_number());
    assert!(body["overdue"]["detail"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_daily_report_overdue_subset_of_open() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000011").await;
    let book_id = add_book(&client, "Overdue Subset Book").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Far enough ahead that the fresh loan is overdue
    let response = client
        .get(format!("{}/reports/daily?date=2099-01-01", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let open = body["open_loans"]["detail"].as_array().expect("No open detail");
    let overdue = body["overdue"]["detail"].as_array().expect("No overdue detail");

    assert!(overdue.iter().any(|r| r["student_id"] == json!(student_id)));
    assert!(overdue.iter().all(|r| open.contains(r)));

    let open_count = body["open_loans"]["count"].as_i64().expect("No open count");
    let overdue_count = body["overdue"]["count"].as_i64().expect("No overdue count");
    assert!(overdue_count <= open_count);
}

#[tokio::test]
#[ignore]
async fn test_daily_report_idempotent() {
    let client = Client::new();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = client
            .get(format!("{}/reports/daily?date=2024-06-01", BASE_URL))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        bodies.push(response.json::<Value>().await.expect("Failed to parse response"));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
#[ignore]
async fn test_daily_report_invalid_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reports/daily?date=June 1st", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_reading_report_for_new_reader() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000007").await;

    let response = client
        .get(format!("{}/readers/{}/reading-report", BASE_URL, student_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let reports = body["reports"].as_array().expect("No reports array");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0], "please read more books");
}

#[tokio::test]
#[ignore]
async fn test_activity_calendar() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000008").await;
    let book_id = add_book(&client, "Calendar Book").await;

    let response = client
        .post(format!("{}/loans/borrow", BASE_URL))
        .json(&json!({ "student_id": student_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let borrow_date = body["borrow_date"].as_str().expect("No borrow date");

    let response = client
        .get(format!("{}/readers/{}/activity", BASE_URL, student_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["activity_data"][borrow_date], json!(1));
}

#[tokio::test]
#[ignore]
async fn test_operation_log_records_registration() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000009").await;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let response = client
        .get(format!("{}/logs?date={}", BASE_URL, today))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let logs = body["logs"].as_array().expect("No logs array");
    assert!(logs.iter().any(|entry| {
        entry["operation"]
            .as_str()
            .is_some_and(|op| op.contains(&student_id))
    }));
}

#[tokio::test]
#[ignore]
async fn test_staff_create_and_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/staff", BASE_URL))
        .json(&json!({
            "name": "Test Librarian",
            "password": "staffpass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let admin_id = body["admin_id"].as_i64().expect("No admin ID");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "id": admin_id.to_string(),
            "password": "staffpass",
            "identity": "librarian"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "librarian");
    assert_eq!(body["full_name"], "Test Librarian");
}

#[tokio::test]
#[ignore]
async fn test_staff_profile_requires_valid_role() {
    let client = Client::new();

    let response = client
        .get(format!("{}/staff/1?role=superuser", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_update_reader_rejects_empty_update() {
    let client = Client::new();
    let student_id = register_reader(&client, "900000010").await;

    let response = client
        .put(format!("{}/readers/{}", BASE_URL, student_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
