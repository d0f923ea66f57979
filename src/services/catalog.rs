//! Book catalog service

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books by id, name or author
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Add a book; returns the allocated book id
    pub async fn create(&self, book: CreateBook) -> AppResult<i64> {
        self.repository.books.create(&book).await
    }

    /// Partial update of a book
    pub async fn update(&self, book_id: i64, update: UpdateBook) -> AppResult<()> {
        self.repository.books.update(book_id, &update).await
    }

    /// Delete a book; returns the deleted book's name
    pub async fn delete(&self, book_id: i64) -> AppResult<String> {
        self.repository.books.delete(book_id).await
    }
}
