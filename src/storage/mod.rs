//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customer(id, name, email_address, address, country_code)
//! - credit_card(id, customer_id, number)
//! - product(id, name, price, description, category)
//! - "order"(id, customer_id, product_id, quantity)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats, SeedReport};
