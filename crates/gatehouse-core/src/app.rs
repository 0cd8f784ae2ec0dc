//! Application state container
//!
//! One storage handle, one session store, one router guarded by that store.

use std::sync::Arc;

use gatehouse_router::{app_router, Navigation, Router, DASHBOARD_PATH, LOGIN_PATH};
use gatehouse_session::{
    AuthApi, FetchUserOutcome, HttpAuthApi, LoginResponse, LogoutOutcome, SessionStore,
};
use gatehouse_storage::Database;

use crate::config::Config;
use crate::Result;

pub struct App {
    /// Configuration
    config: Config,
    /// Durable storage
    db: Database,
    /// Session store (shared with the router guard)
    session: SessionStore,
    /// Guarded router
    router: Router,
}

impl App {
    /// Open storage and restore any persisted session
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        let api = HttpAuthApi::new(&config.api_base_url, &config.user_agent)?;

        Self::with_parts(config, db, Arc::new(api))
    }

    pub fn with_parts(config: Config, db: Database, api: Arc<dyn AuthApi>) -> Result<Self> {
        let session =
            SessionStore::persistent(api, db.clone())?.with_policy(config.invalidation_policy);
        let router = app_router(session.clone());

        tracing::info!(
            api = %config.api_base_url,
            authenticated = session.is_authenticated(),
            "App ready"
        );

        Ok(Self {
            config,
            db,
            session,
            router,
        })
    }

    /// Validate a restored token by fetching the user. A rejected token is
    /// purged here, before the first navigation.
    pub async fn initialize(&self) -> FetchUserOutcome {
        let outcome = self.session.refresh_user().await;
        tracing::debug!(
            authenticated = self.session.is_authenticated(),
            "Session initialized"
        );
        outcome
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // === Session operations ===

    /// Log in, then land on the dashboard
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(LoginResponse, Navigation)> {
        let response = self.session.login(email, password).await?;
        let navigation = self.router.navigate(DASHBOARD_PATH)?;
        Ok((response, navigation))
    }

    /// Log out, then land on the login page
    pub async fn sign_out(&self) -> Result<(LogoutOutcome, Navigation)> {
        let outcome = self.session.logout().await;
        let navigation = self.router.navigate(LOGIN_PATH)?;
        Ok((outcome, navigation))
    }

    // === Navigation ===

    pub fn navigate(&self, path: &str) -> Result<Navigation> {
        Ok(self.router.navigate(path)?)
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            session: self.session.clone(),
            router: self.router.clone(),
        }
    }
}
