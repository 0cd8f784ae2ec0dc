//! Session data structure

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EmptyTokenError;

/// Bearer token issued by the backend on login. Never empty.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(EmptyTokenError);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Token {
    type Error = EmptyTokenError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

// Keep tokens out of logs
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// The authenticated user as returned by the backend. The shape is owned by
/// the API, so the record is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for UserProfile {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<Token>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn with_token(token: Token) -> Self {
        Self {
            token: Some(token),
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(Token::new(""), Err(EmptyTokenError));
        assert_eq!(Token::new("abc").unwrap().as_str(), "abc");

        let decoded: Result<Token, _> = serde_json::from_value(json!(""));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("super-secret").unwrap();
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[test]
    fn test_user_profile_accessors() {
        let user = UserProfile::new(json!({"id": 1, "name": "Ada", "email": "ada@example.com"}));
        assert_eq!(user.id(), Some(&json!(1)));
        assert_eq!(user.name(), Some("Ada"));
        assert_eq!(user.email(), Some("ada@example.com"));

        let opaque = UserProfile::new(json!({"uuid": "x"}));
        assert!(opaque.id().is_none());
        assert!(opaque.name().is_none());
    }

    #[test]
    fn test_authenticated_follows_token() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session = Session::with_token(Token::new("t1").unwrap());
        assert!(session.is_authenticated());

        session.user = Some(UserProfile::new(json!({"id": 1})));
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
    }
}
