//! Book catalog model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub book_id: i64,
    pub book_name: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publish_year: Option<i64>,
    pub location: Option<String>,
    /// false iff an open loan exists for this book
    pub available: bool,
}

/// Create book request (librarian)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub book_name: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publish_year: Option<i64>,
    pub location: Option<String>,
    pub available: Option<bool>,
}

/// Partial book update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub book_name: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publish_year: Option<i64>,
    pub location: Option<String>,
    pub available: Option<bool>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.author.is_none()
            && self.publisher.is_none()
            && self.publish_year.is_none()
            && self.location.is_none()
            && self.available.is_none()
    }
}
