//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] gatehouse_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] gatehouse_session::SessionError),

    #[error("Request error: {0}")]
    Request(#[from] gatehouse_session::RequestError),

    #[error("Router error: {0}")]
    Router(#[from] gatehouse_router::RouterError),

    #[error("Configuration error: {0}")]
    Config(String),
}
