//! Books repository for catalog operations

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::{
    allocator,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::audit,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Search books by id, name or author
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", query);
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id, book_name, author, publisher, publish_year, location, available
            FROM books
            WHERE CAST(book_id AS TEXT) LIKE ?1 OR book_name LIKE ?1 OR author LIKE ?1
            ORDER BY book_name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Add a new book; the identifier is allocated from the existing set
    /// inside the insert transaction
    pub async fn create(&self, book: &CreateBook) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let ids: Vec<String> = sqlx::query_scalar("SELECT CAST(book_id AS TEXT) FROM books")
            .fetch_all(&mut *tx)
            .await?;
        let book_id = allocator::next_numeric(&ids);

        sqlx::query(
            r#"
            INSERT INTO books (book_id, book_name, author, publisher, publish_year, location, available)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book_id)
        .bind(&book.book_name)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.publish_year)
        .bind(&book.location)
        .bind(book.available.unwrap_or(true))
        .execute(&mut *tx)
        .await?;

        audit::record(&mut *tx, &format!("librarian added book {}", book_id)).await?;

        tx.commit().await?;

        tracing::info!(book_id, "book added");
        Ok(book_id)
    }

    /// Partial update of book metadata or the availability flag
    pub async fn update(&self, book_id: i64, update: &UpdateBook) -> AppResult<()> {
        if update.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM books WHERE book_id = ?")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE books SET ");
        let mut fields = qb.separated(", ");
        if let Some(ref v) = update.book_name {
            fields.push("book_name = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.author {
            fields.push("author = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.publisher {
            fields.push("publisher = ").push_bind_unseparated(v);
        }
        if let Some(v) = update.publish_year {
            fields.push("publish_year = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.location {
            fields.push("location = ").push_bind_unseparated(v);
        }
        if let Some(v) = update.available {
            fields.push("available = ").push_bind_unseparated(v);
        }
        qb.push(" WHERE book_id = ").push_bind(book_id);

        qb.build().execute(&mut *tx).await?;

        audit::record(&mut *tx, &format!("librarian updated book {}", book_id)).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a book and its loan history.
    ///
    /// Refused while an open loan exists. Returns the deleted book's name.
    pub async fn delete(&self, book_id: i64) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;

        let book_name: Option<String> =
            sqlx::query_scalar("SELECT book_name FROM books WHERE book_id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(book_name) = book_name else {
            return Err(AppError::NotFound("Book not found".to_string()));
        };

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM borrow_records
            WHERE book_id = ? AND (return_date IS NULL OR return_date = '')
            "#,
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if active > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete book with {} active borrowing(s). Please return all books first.",
                active
            )));
        }

        sqlx::query("DELETE FROM borrow_records WHERE book_id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM books WHERE book_id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        audit::record(&mut *tx, &format!("librarian deleted book {}", book_id)).await?;

        tx.commit().await?;

        tracing::info!(book_id, %book_name, "book deleted");
        Ok(book_name)
    }
}
