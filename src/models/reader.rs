//! Reader (library member) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Reader projection without the password column
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reader {
    /// Display identifier, canonical format "Reader N"
    pub reader_id: String,
    /// 9-character natural key used by all loan operations
    pub student_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub major: Option<String>,
}

/// Self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterReader {
    #[validate(length(equal = 9, message = "ID must be 9 digits"))]
    pub student_id: String,
    pub password: String,
}

/// Librarian-created reader record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReader {
    #[validate(length(equal = 9, message = "ID must be 9 digits"))]
    pub student_id: String,
    pub name: Option<String>,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub major: Option<String>,
}

/// Partial reader update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReader {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub department: Option<String>,
    pub major: Option<String>,
}

impl UpdateReader {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password.is_none()
            && self.department.is_none()
            && self.major.is_none()
    }
}
