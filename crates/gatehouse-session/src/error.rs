//! Session error types

use thiserror::Error;

/// A failed HTTP call: the transport broke, or the server said no
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RequestError {
    /// HTTP status of a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the backend refused the credentials (401 or 403)
    pub fn is_rejection(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Storage error: {0}")]
    Storage(#[from] gatehouse_storage::StorageError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("token must not be empty")]
pub struct EmptyTokenError;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> RequestError {
        RequestError::Status {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_rejection_statuses() {
        assert!(status(401).is_rejection());
        assert!(status(403).is_rejection());
        assert!(!status(404).is_rejection());
        assert!(!status(500).is_rejection());
        assert!(!status(503).is_rejection());
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err: RequestError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.status(), None);
        assert!(!err.is_rejection());
    }
}
