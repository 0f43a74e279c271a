//! PostgreSQL sink
//!
//! Appends the exported dataset to a table over a single, scoped connection.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgresSink;
pub use client::{ConnectionParams, PgSession};
