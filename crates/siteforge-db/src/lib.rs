//! Siteforge Database — SurrealDB connection management and
//! implementations of the core storage ports.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Registry schema migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Storage port implementations ([`repository`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
