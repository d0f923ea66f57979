//! Staff repository for librarian and director records.
//!
//! Librarians and directors live in separate tables selected by
//! [`StaffRole::table`]; the role never reaches SQL as free text.

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::{
    allocator,
    error::{AppError, AppResult},
    models::staff::{CreateStaff, StaffMember, StaffRole, UpdateStaff},
    repository::audit,
};

const STAFF_COLUMNS: &str = "admin_id, name, email, phone, department";

#[derive(Clone)]
pub struct StaffRepository {
    pool: Pool<Sqlite>,
}

impl StaffRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Search librarians by id, name or contact fields
    pub async fn search(&self, query: &str) -> AppResult<Vec<StaffMember>> {
        let pattern = format!("%{}%", query);
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT admin_id, name, email, phone, department
            FROM librarians
            WHERE CAST(admin_id AS TEXT) LIKE ?1 OR name LIKE ?1
               OR phone LIKE ?1 OR email LIKE ?1
            ORDER BY admin_id
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// List all librarians
    pub async fn list(&self) -> AppResult<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT admin_id, name, email, phone, department FROM librarians ORDER BY admin_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Get one staff member by role and id
    pub async fn get(&self, role: StaffRole, admin_id: i64) -> AppResult<StaffMember> {
        sqlx::query_as::<_, StaffMember>(&format!(
            "SELECT {STAFF_COLUMNS} FROM {} WHERE admin_id = ?",
            role.table()
        ))
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", role.as_str())))
    }

    /// Get a staff member's stored password for the credential check
    pub async fn password(&self, role: StaffRole, admin_id: i64) -> AppResult<Option<String>> {
        let password: Option<String> = sqlx::query_scalar(&format!(
            "SELECT password FROM {} WHERE admin_id = ?",
            role.table()
        ))
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(password)
    }

    /// Add a librarian; the id is allocated from the existing set inside
    /// the insert transaction. Returns the allocated admin id.
    pub async fn create(&self, staff: &CreateStaff) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let ids: Vec<String> = sqlx::query_scalar("SELECT CAST(admin_id AS TEXT) FROM librarians")
            .fetch_all(&mut *tx)
            .await?;
        let admin_id = allocator::next_numeric(&ids);

        let name = if staff.name.trim().is_empty() {
            "default user name, please edit it"
        } else {
            staff.name.as_str()
        };

        sqlx::query(
            r#"
            INSERT INTO librarians (admin_id, name, password, email, phone, department)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(admin_id)
        .bind(name)
        .bind(&staff.password)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.department)
        .execute(&mut *tx)
        .await?;

        audit::record(&mut *tx, &format!("director added new librarian {}", admin_id)).await?;

        tx.commit().await?;

        tracing::info!(admin_id, "librarian created");
        Ok(admin_id)
    }

    /// Partial update of a staff record
    pub async fn update(&self, admin_id: i64, update: &UpdateStaff) -> AppResult<()> {
        if update.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", update.role.table()));
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
        qb.push(" WHERE admin_id = ").push_bind(admin_id);

        let updated = qb.build().execute(&mut *tx).await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} not found",
                update.role.as_str()
            )));
        }

        audit::record(
            &mut *tx,
            &format!("{} {} updated personal information", update.role.as_str(), admin_id),
        )
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete a librarian
    pub async fn delete(&self, admin_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM librarians WHERE admin_id = ?")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("librarian not found".to_string()));
        }

        audit::record(&mut *tx, &format!("director deleted librarian {}", admin_id)).await?;

        tx.commit().await?;

        tracing::info!(admin_id, "librarian deleted");
        Ok(())
    }
}
