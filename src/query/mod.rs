//! Query Layer - read-only queries over the storefront schema

pub mod engine;

pub use engine::{QueryEngine, CustomerCard, CustomerOrderCount};
