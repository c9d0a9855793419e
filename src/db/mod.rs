//! Database module: command history persistence.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: the `HistoryStorage` repository

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{CommandEntry, ExecutionStatus};
pub use schema::SQLITE_INIT;
pub use sqlite::{HistoryStorage, SqlitePool, connect};
