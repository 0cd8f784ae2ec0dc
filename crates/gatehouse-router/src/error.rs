//! Router error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("No route named: {0}")]
    UnknownName(String),

    #[error("Too many redirects while navigating to: {0}")]
    RedirectLoop(String),
}
