//! Staff record management service

use crate::{
    error::AppResult,
    models::staff::{CreateStaff, StaffMember, StaffRole, UpdateStaff},
    repository::Repository,
};

#[derive(Clone)]
pub struct StaffService {
    repository: Repository,
}

impl StaffService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search librarians
    pub async fn search(&self, query: &str) -> AppResult<Vec<StaffMember>> {
        self.repository.staff.search(query).await
    }

    /// List all librarians
    pub async fn list(&self) -> AppResult<Vec<StaffMember>> {
        self.repository.staff.list().await
    }

    /// Get a staff member by role and id
    pub async fn get(&self, role: StaffRole, admin_id: i64) -> AppResult<StaffMember> {
        self.repository.staff.get(role, admin_id).await
    }

    /// Add a librarian; returns the allocated admin id
    pub async fn create(&self, staff: CreateStaff) -> AppResult<i64> {
        self.repository.staff.create(&staff).await
    }

    /// Partial update of a staff record
    pub async fn update(&self, admin_id: i64, update: UpdateStaff) -> AppResult<()> {
        self.repository.staff.update(admin_id, &update).await
    }

    /// Delete a librarian
    pub async fn delete(&self, admin_id: i64) -> AppResult<()> {
        self.repository.staff.delete(admin_id).await
    }
}
