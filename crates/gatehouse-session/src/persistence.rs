//! Token persistence
//!
//! The store never touches durable storage itself. It emits a
//! [`SessionEvent`] on every transition and [`TokenPersistence`] mirrors the
//! token into a [`TokenStore`].

use gatehouse_storage::{Database, StorageError};

use crate::session::Token;

/// Storage key holding the raw token string
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Authenticated { token: Token },
    UserUpdated,
    Cleared,
}

pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent) -> Result<(), StorageError>;
}

pub trait TokenStore: Send + Sync {
    fn load_token(&self) -> Result<Option<Token>, StorageError>;

    fn save_token(&self, token: &Token) -> Result<(), StorageError>;

    fn clear_token(&self) -> Result<(), StorageError>;
}

impl TokenStore for Database {
    fn load_token(&self) -> Result<Option<Token>, StorageError> {
        // An empty stored value reads as no token
        Ok(self
            .get_item(TOKEN_KEY)?
            .and_then(|raw| Token::new(raw).ok()))
    }

    fn save_token(&self, token: &Token) -> Result<(), StorageError> {
        self.set_item(TOKEN_KEY, token.as_str())
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        self.remove_item(TOKEN_KEY)
    }
}

pub struct TokenPersistence<S> {
    store: S,
}

impl<S: TokenStore> TokenPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: TokenStore> SessionObserver for TokenPersistence<S> {
    fn on_event(&self, event: &SessionEvent) -> Result<(), StorageError> {
        match event {
            SessionEvent::Authenticated { token } => {
                self.store.save_token(token)?;
                tracing::debug!("Persisted session token");
            }
            SessionEvent::Cleared => {
                self.store.clear_token()?;
                tracing::debug!("Removed persisted session token");
            }
            SessionEvent::UserUpdated => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_token_store() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_token().unwrap().is_none());

        db.save_token(&Token::new("abc").unwrap()).unwrap();
        assert_eq!(db.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(db.load_token().unwrap().unwrap().as_str(), "abc");

        db.clear_token().unwrap();
        assert!(db.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_empty_stored_token_is_absent() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(TOKEN_KEY, "").unwrap();
        assert!(db.load_token().unwrap().is_none());
    }

    #[test]
    fn test_persistence_follows_events() {
        let db = Database::open_in_memory().unwrap();
        let observer = TokenPersistence::new(db.clone());

        observer
            .on_event(&SessionEvent::Authenticated {
                token: Token::new("t1").unwrap(),
            })
            .unwrap();
        assert_eq!(db.get_item(TOKEN_KEY).unwrap().as_deref(), Some("t1"));

        observer.on_event(&SessionEvent::UserUpdated).unwrap();
        assert_eq!(db.get_item(TOKEN_KEY).unwrap().as_deref(), Some("t1"));

        observer.on_event(&SessionEvent::Cleared).unwrap();
        assert!(db.get_item(TOKEN_KEY).unwrap().is_none());
    }
}
