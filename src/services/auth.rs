//! Credential check service.
//!
//! A plain (role, id, password) predicate against the matching identity
//! table. Failures never reveal whether the account exists.

use crate::{
    error::{AppError, AppResult},
    models::staff::StaffRole,
    repository::Repository,
};

/// Successful login outcome
pub struct LoginOutcome {
    pub user_id: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Verify credentials for a role and return the display name
    pub async fn login(&self, role: &str, id: &str, password: &str) -> AppResult<LoginOutcome> {
        let invalid = || AppError::Authentication("Invalid credentials".to_string());

        let full_name = match role {
            "reader" => {
                let stored = self.repository.readers.password(id).await?;
                if stored.as_deref() != Some(password) {
                    return Err(invalid());
                }
                self.repository.readers.get(id).await?.name
            }
            "librarian" | "director" => {
                let staff_role = StaffRole::parse(role)?;
                let admin_id: i64 = id.parse().map_err(|_| invalid())?;
                let stored = self.repository.staff.password(staff_role, admin_id).await?;
                if stored.as_deref() != Some(password) {
                    return Err(invalid());
                }
                self.repository.staff.get(staff_role, admin_id).await?.name
            }
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown identity type: {}",
                    other
                )));
            }
        };

        tracing::info!(role, id, "login succeeded");

        Ok(LoginOutcome {
            user_id: id.to_string(),
            full_name,
            role: role.to_string(),
        })
    }
}
