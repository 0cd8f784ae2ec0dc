//! Results of the actions that never fail outright

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::session::UserProfile;

/// Which `/user` failures count as the backend revoking the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationPolicy {
    /// Every failure clears the session, network errors included
    #[default]
    AnyFailure,
    /// Only 401/403 clear the session; anything else keeps it for a retry
    RejectedOnly,
}

impl InvalidationPolicy {
    pub fn invalidates(&self, error: &RequestError) -> bool {
        match self {
            InvalidationPolicy::AnyFailure => true,
            InvalidationPolicy::RejectedOnly => error.is_rejection(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidationPolicy::AnyFailure => "any_failure",
            InvalidationPolicy::RejectedOnly => "rejected_only",
        }
    }
}

impl std::fmt::Display for InvalidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvalidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "any_failure" | "any" => Ok(InvalidationPolicy::AnyFailure),
            "rejected_only" | "rejected" => Ok(InvalidationPolicy::RejectedOnly),
            _ => Err(format!("Unknown invalidation policy: {}", s)),
        }
    }
}

#[derive(Debug)]
pub enum FetchUserOutcome {
    /// Profile refreshed
    Fetched(UserProfile),
    /// No token held, nothing was requested
    NoSession,
    /// The request failed and the session was cleared
    Invalidated(RequestError),
    /// The request failed but the session was kept
    Retryable(RequestError),
    /// The session changed while the request was in flight; nothing applied
    Superseded,
}

impl FetchUserOutcome {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            FetchUserOutcome::Fetched(user) => Some(user),
            _ => None,
        }
    }

    pub fn into_user(self) -> Option<UserProfile> {
        match self {
            FetchUserOutcome::Fetched(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_invalidated(&self) -> bool {
        matches!(self, FetchUserOutcome::Invalidated(_))
    }
}

#[derive(Debug)]
pub enum LogoutOutcome {
    Acknowledged,
    /// The backend call failed; the local session was cleared anyway
    BackendFailed(RequestError),
}

impl LogoutOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, LogoutOutcome::Acknowledged)
    }
}

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
    fn test_any_failure_invalidates_everything() {
        let policy = InvalidationPolicy::AnyFailure;
        assert!(policy.invalidates(&status(401)));
        assert!(policy.invalidates(&status(500)));
    }

    #[test]
    fn test_rejected_only() {
        let policy = InvalidationPolicy::RejectedOnly;
        assert!(policy.invalidates(&status(401)));
        assert!(policy.invalidates(&status(403)));
        assert!(!policy.invalidates(&status(502)));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "rejected-only".parse::<InvalidationPolicy>().unwrap(),
            InvalidationPolicy::RejectedOnly
        );
        assert_eq!(
            "ANY_FAILURE".parse::<InvalidationPolicy>().unwrap(),
            InvalidationPolicy::AnyFailure
        );
        assert!("sometimes".parse::<InvalidationPolicy>().is_err());
        assert_eq!(InvalidationPolicy::default(), InvalidationPolicy::AnyFailure);
    }
}
