//! Readers repository for membership operations

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::{
    allocator,
    error::{AppError, AppResult},
    models::reader::{Reader, UpdateReader},
    repository::audit,
};

const DEFAULT_NAME: &str = "default user name, please edit it";

const READER_COLUMNS: &str =
    "reader_id, student_id, name, email, phone, department, major";

#[derive(Clone)]
pub struct ReadersRepository {
    pool: Pool<Sqlite>,
}

impl ReadersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Search readers across id, name, contact and study fields
    pub async fn search(&self, query: &str) -> AppResult<Vec<Reader>> {
        let pattern = format!("%{}%", query);
        let readers = sqlx::query_as::<_, Reader>(&format!(
            r#"
            SELECT {READER_COLUMNS}
            FROM readers
            WHERE student_id LIKE ?1 OR name LIKE ?1 OR phone LIKE ?1
               OR email LIKE ?1 OR department LIKE ?1 OR major LIKE ?1
            ORDER BY reader_id
            "#
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(readers)
    }

    /// Get a reader profile by student id
    pub async fn get(&self, student_id: &str) -> AppResult<Reader> {
        sqlx::query_as::<_, Reader>(&format!(
            "SELECT {READER_COLUMNS} FROM readers WHERE student_id = ?"
        ))
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reader not found".to_string()))
    }

    /// Get a reader's stored password for the credential check
    pub async fn password(&self, student_id: &str) -> AppResult<Option<String>> {
        let password: Option<String> =
            sqlx::query_scalar("SELECT password FROM readers WHERE student_id = ?")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(password)
    }

    /// Insert a new reader row; the display id is allocated from the
    /// existing set inside the insert transaction.
    ///
    /// `audit_op` describes the operation for the log (self-registration
    /// and librarian creation narrate differently). Returns the allocated
    /// reader id.
    pub async fn create(
        &self,
        student_id: &str,
        name: Option<&str>,
        password: &str,
        email: Option<&str>,
        phone: Option<&str>,
        department: Option<&str>,
        major: Option<&str>,
        audit_op: &str,
    ) -> AppResult<String> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM readers WHERE student_id = ?")
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_some() {
            return Err(AppError::Conflict(
                "this id already has an account".to_string(),
            ));
        }

        let ids: Vec<String> = sqlx::query_scalar("SELECT reader_id FROM readers")
            .fetch_all(&mut *tx)
            .await?;
        let reader_id = allocator::next_reader_id(&ids);

        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => DEFAULT_NAME,
        };

        sqlx::query(
            r#"
            INSERT INTO readers (reader_id, student_id, name, password, email, phone, department, major)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reader_id)
        .bind(student_id)
        .bind(name)
        .bind(password)
        .bind(email)
        .bind(phone)
        .bind(department)
        .bind(major)
        .execute(&mut *tx)
        .await?;

        audit::record(&mut *tx, audit_op).await?;

        tx.commit().await?;

        tracing::info!(%reader_id, student_id, "reader created");
        Ok(reader_id)
    }

    /// Partial update of a reader record.
    ///
    /// `audit_op` describes the operation for the log.
    pub async fn update(
        &self,
        student_id: &str,
        update: &UpdateReader,
        audit_op: &str,
    ) -> AppResult<()> {
        if update.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE readers SET ");
        let mut fields = qb.separated(", ");
        if let Some(ref v) = update.name {
            fields.push("name = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.email {
            fields.push("email = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.phone {
            fields.push("phone = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.password {
            fields.push("password = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.department {
            fields.push("department = ").push_bind_unseparated(v);
        }
        if let Some(ref v) = update.major {
            fields.push("major = ").push_bind_unseparated(v);
        }
        qb.push(" WHERE student_id = ").push_bind(student_id);

        let updated = qb.build().execute(&mut *tx).await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Reader not found".to_string()));
        }

        audit::record(&mut *tx, audit_op).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a reader and their loan history.
    ///
    /// Refused while the reader holds open loans.
    pub async fn delete(&self, student_id: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let reader_id: Option<String> =
            sqlx::query_scalar("SELECT reader_id FROM readers WHERE student_id = ?")
                .bind(student_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(reader_id) = reader_id else {
            return Err(AppError::NotFound("Reader not found".to_string()));
        };

        let active: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM borrow_records
            WHERE student_id = ? AND (return_date IS NULL OR return_date = '')
            "#,
        )
        .bind(student_id)
        .fetch_one(&mut *tx)
        .await?;

        if active > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete reader with {} active borrowing(s). Please return all books first.",
                active
            )));
        }

        sqlx::query("DELETE FROM borrow_records WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM readers WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        audit::record(
            &mut *tx,
            &format!("librarian deleted reader with student_id = {}", student_id),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(%reader_id, student_id, "reader deleted");
        Ok(())
    }
}
