//! Repository layer for database operations

pub mod audit;
pub mod books;
pub mod loans;
pub mod readers;
pub mod staff;

use sqlx::{Pool, Sqlite};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
    pub readers: readers::ReadersRepository,
    pub staff: staff::StaffRepository,
    pub loans: loans::LoansRepository,
    pub audit: audit::AuditRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            readers: readers::ReadersRepository::new(pool.clone()),
            staff: staff::StaffRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            audit: audit::AuditRepository::new(pool.clone()),
            pool,
        }
    }
}
