//! Data models shared across the repository and API layers

pub mod audit;
pub mod book;
pub mod loan;
pub mod reader;
pub mod report;
pub mod staff;
