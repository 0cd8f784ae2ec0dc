//! Session Store
//!
//! Holds the in-memory session and runs the authentication actions against
//! an [`AuthApi`]. Clones share state, so one store can be handed to the
//! router and to the views at the same time.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use gatehouse_storage::StorageError;

use crate::api::{AuthApi, Credentials, LoginResponse, RegisterRequest};
use crate::error::RequestError;
use crate::outcome::{FetchUserOutcome, InvalidationPolicy, LogoutOutcome};
use crate::persistence::{SessionEvent, SessionObserver, TokenPersistence, TokenStore};
use crate::session::{Session, Token, UserProfile};
use crate::Result;

pub struct SessionStore {
    /// Current session
    state: Arc<RwLock<Session>>,
    /// Backend
    api: Arc<dyn AuthApi>,
    /// Notified on every session transition
    observers: Arc<RwLock<Vec<Arc<dyn SessionObserver>>>>,
    policy: InvalidationPolicy,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            api,
            observers: Arc::new(RwLock::new(Vec::new())),
            policy: InvalidationPolicy::default(),
        }
    }

    /// Build a store restored from `tokens` that keeps `tokens` in sync
    pub fn persistent<S>(api: Arc<dyn AuthApi>, tokens: S) -> Result<Self>
    where
        S: TokenStore + 'static,
    {
        let store = Self::new(api);
        store.restore(&tokens)?;
        store.observe(Arc::new(TokenPersistence::new(tokens)));
        Ok(store)
    }

    pub fn with_policy(mut self, policy: InvalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }

    pub fn observe(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.write().push(observer);
    }

    /// Load the persisted token, if any. The user profile is left empty
    /// until the next `fetch_user`.
    pub fn restore(&self, tokens: &dyn TokenStore) -> Result<bool> {
        let token = tokens.load_token()?;
        let authenticated = token.is_some();

        *self.state.write() = Session {
            token,
            user: None,
        };

        tracing::info!(authenticated, "Restored session");

        Ok(authenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn token(&self) -> Option<Token> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    /// Create an account. Does not log in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> std::result::Result<Value, RequestError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: password_confirmation.to_string(),
        };

        match self.api.register(&request).await {
            Ok(result) => {
                tracing::info!(email = %email, "Registered account");
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Registration failed");
                Err(e)
            }
        }
    }

    /// Authenticate and persist the returned token.
    ///
    /// Either both token and user are set or neither is: the token is
    /// persisted before memory is touched, and a failed write aborts after
    /// observers are put back to the previous token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login failed");
                return Err(e.into());
            }
        };

        if let Err(e) = self.notify(&SessionEvent::Authenticated {
            token: response.token.clone(),
        }) {
            // Observers ahead of the failing one already saw the new token;
            // put them back to the state memory still holds.
            let rollback = match self.token() {
                Some(token) => SessionEvent::Authenticated { token },
                None => SessionEvent::Cleared,
            };
            self.notify_lossy(&rollback);
            tracing::error!(error = %e, "Failed to persist session token, login aborted");
            return Err(e.into());
        }

        {
            let mut state = self.state.write();
            state.token = Some(response.token.clone());
            state.user = Some(response.user.clone());
        }

        tracing::info!(user_id = ?response.user.id(), "Logged in");

        Ok(response)
    }

    /// Tell the backend, then clear the session whatever it answered
    pub async fn logout(&self) -> LogoutOutcome {
        let token = self.token();

        let outcome = match self.api.logout(token.as_ref()).await {
            Ok(()) => LogoutOutcome::Acknowledged,
            Err(e) => {
                tracing::warn!(error = %e, "Logout request failed, clearing session anyway");
                LogoutOutcome::BackendFailed(e)
            }
        };

        self.clear();
        tracing::info!("Logged out");

        outcome
    }

    /// Refresh the user profile. `None` when there is no session or the
    /// session was just invalidated.
    pub async fn fetch_user(&self) -> Option<UserProfile> {
        self.refresh_user().await.into_user()
    }

    pub async fn refresh_user(&self) -> FetchUserOutcome {
        let Some(token) = self.token() else {
            return FetchUserOutcome::NoSession;
        };

        let outcome = self.api.current_user(&token).await;

        // Logout or another login may have landed while the request was out
        if self.token().as_ref() != Some(&token) {
            tracing::debug!("Session changed during user fetch, discarding result");
            return FetchUserOutcome::Superseded;
        }

        match outcome {
            Ok(user) => {
                {
                    let mut state = self.state.write();
                    if state.token.as_ref() != Some(&token) {
                        return FetchUserOutcome::Superseded;
                    }
                    state.user = Some(user.clone());
                }
                self.notify_lossy(&SessionEvent::UserUpdated);
                tracing::debug!(user_id = ?user.id(), "Fetched current user");
                FetchUserOutcome::Fetched(user)
            }
            Err(e) if self.policy.invalidates(&e) => {
                tracing::warn!(
                    error = %e,
                    status = ?e.status(),
                    "Current user request failed, invalidating session"
                );
                if !self.clear_if_current(&token) {
                    return FetchUserOutcome::Superseded;
                }
                FetchUserOutcome::Invalidated(e)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    status = ?e.status(),
                    "Current user request failed, keeping session"
                );
                FetchUserOutcome::Retryable(e)
            }
        }
    }

    fn clear(&self) {
        self.state.write().clear();
        self.notify_lossy(&SessionEvent::Cleared);
    }

    /// Clear only if `token` is still the held token
    fn clear_if_current(&self, token: &Token) -> bool {
        {
            let mut state = self.state.write();
            if state.token.as_ref() != Some(token) {
                return false;
            }
            state.clear();
        }
        self.notify_lossy(&SessionEvent::Cleared);
        true
    }

    fn notify(&self, event: &SessionEvent) -> std::result::Result<(), StorageError> {
        // Snapshot so observers run without the list locked
        let observers = self.observers.read().clone();
        for observer in observers {
            observer.on_event(event)?;
        }
        Ok(())
    }

    fn notify_lossy(&self, event: &SessionEvent) {
        if let Err(e) = self.notify(event) {
            tracing::error!(event = ?event, error = %e, "Session observer failed");
        }
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            api: Arc::clone(&self.api),
            observers: Arc::clone(&self.observers),
            policy: self.policy,
        }
    }
}
