//! Business logic services

pub mod auth;
pub mod catalog;
pub mod lending;
pub mod readers;
pub mod reports;
pub mod staff;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub readers: readers::ReadersService,
    pub staff: staff::StaffService,
    pub lending: lending::LendingService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending_config: LendingConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            readers: readers::ReadersService::new(repository.clone()),
            staff: staff::StaffService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone(), lending_config),
            reports: reports::ReportsService::new(repository.clone()),
            repository,
        }
    }
}
