//! Staff (librarian/director) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Staff role, selecting the backing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Librarian,
    Director,
}

impl StaffRole {
    /// Table backing this role. Keeping this a closed match means role
    /// input can never reach SQL as free text.
    pub fn table(&self) -> &'static str {
        match self {
            StaffRole::Librarian => "librarians",
            StaffRole::Director => "directors",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Librarian => "librarian",
            StaffRole::Director => "director",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "librarian" => Ok(StaffRole::Librarian),
            "director" => Ok(StaffRole::Director),
            other => Err(AppError::Validation(format!(
                "Invalid role '{}'. Must be 'librarian' or 'director'",
                other
            ))),
        }
    }
}

/// Staff projection without the password column
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffMember {
    pub admin_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// Create staff request (director)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaff {
    pub name: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// Partial staff update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStaff {
    pub role: StaffRole,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateStaff {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
