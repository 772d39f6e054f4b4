//! # shopdb - Sample storefront schema over SQLite
//!
//! shopdb provides:
//! - Four record types (customers, credit cards, products, orders) with validation
//! - SQLite-backed storage with idempotent schema creation and atomic seeding
//! - A multi-locale synthetic data generator
//! - Query engine for filter, group-by and join queries over the schema

pub mod model;
pub mod storage;
pub mod seed;
pub mod query;
pub mod config;
pub mod ui;
pub mod output;

// Re-exports for convenient access
pub use model::{Customer, CreditCard, Product, Order};
pub use storage::{SqliteStore, DbStats, SeedReport};
pub use query::QueryEngine;
pub use seed::SampleGenerator;

/// Result type alias for shopdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for shopdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open database {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema conflict on table '{table}': {detail}")]
    SchemaConflict { table: String, detail: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Storage error: {0}")]
    Storage(rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
            Error::ConstraintViolation(err.to_string())
        } else {
            Error::Storage(err)
        }
    }
}
