//! Gatehouse Session Store
//!
//! - A session is a token plus the authenticated user's profile
//! - Authenticated means a non-empty token is held
//! - Only the token is persisted; the profile is re-fetched after a restart
//! - Registering does not authenticate; only `login` does
//! - A token the backend refuses is purged by `fetch_user`

mod api;
mod error;
mod outcome;
mod persistence;
mod session;
mod store;

pub use api::{AuthApi, Credentials, HttpAuthApi, LoginResponse, RegisterRequest};
pub use error::{EmptyTokenError, RequestError, SessionError};
pub use outcome::{FetchUserOutcome, InvalidationPolicy, LogoutOutcome};
pub use persistence::{SessionEvent, SessionObserver, TokenPersistence, TokenStore, TOKEN_KEY};
pub use session::{Session, Token, UserProfile};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
