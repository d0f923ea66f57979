//! Reader record management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reader::{CreateReader, Reader, RegisterReader, UpdateReader},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search readers
    pub async fn search(&self, query: &str) -> AppResult<Vec<Reader>> {
        self.repository.readers.search(query).await
    }

    /// Get a reader profile
    pub async fn get(&self, student_id: &str) -> AppResult<Reader> {
        self.repository.readers.get(student_id).await
    }

    /// Self-registration with student id and password only
    pub async fn register(&self, request: RegisterReader) -> AppResult<String> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let audit_op = format!("Student {} registered a reader account", request.student_id);
        self.repository
            .readers
            .create(
                &request.student_id,
                None,
                &request.password,
                None,
                None,
                None,
                None,
                &audit_op,
            )
            .await
    }

    /// Librarian-created full reader record
    pub async fn create(&self, request: CreateReader) -> AppResult<String> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let audit_op = format!(
            "librarian added new reader with student_id = {}",
            request.student_id
        );
        self.repository
            .readers
            .create(
                &request.student_id,
                request.name.as_deref(),
                &request.password,
                request.email.as_deref(),
                request.phone.as_deref(),
                request.department.as_deref(),
                request.major.as_deref(),
                &audit_op,
            )
            .await
    }

    /// Reader updating their own contact details
    pub async fn update_own(&self, student_id: &str, update: UpdateReader) -> AppResult<()> {
        let audit_op = format!("Student {} updated their personal information", student_id);
        self.repository
            .readers
            .update(student_id, &update, &audit_op)
            .await
    }

    /// Librarian updating a reader record
    pub async fn update(&self, student_id: &str, update: UpdateReader) -> AppResult<()> {
        let audit_op = format!(
            "librarian updated the reader with student_id = {}",
            student_id
        );
        self.repository
            .readers
            .update(student_id, &update, &audit_op)
            .await
    }

    /// Delete a reader and their loan history
    pub async fn delete(&self, student_id: &str) -> AppResult<()> {
        self.repository.readers.delete(student_id).await
    }
}
