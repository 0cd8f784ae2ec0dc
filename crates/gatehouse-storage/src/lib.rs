//! Gatehouse Storage Layer
//!
//! Durable key/value storage that survives process restarts, the way browser
//! local storage does for a web client. Backed by SQLite.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
