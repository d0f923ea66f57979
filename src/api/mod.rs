//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod loans;
pub mod logs;
pub mod openapi;
pub mod readers;
pub mod reports;
pub mod staff;
