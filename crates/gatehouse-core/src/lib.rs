//! Gatehouse Core
//!
//! Wires durable storage, the session store and the guarded router into
//! one [`App`]. The session store is owned here and handed to the router,
//! never reached through a global.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use gatehouse_router::{
    app_router, app_routes, evaluate, AuthGuard, GuardDecision, History, HistoryEntry, LazyView,
    Location, Navigation, NavigationGuard, RouteMeta, RouteRecord, RouteTarget, Router,
    RouterError, ViewModule, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH,
};
pub use gatehouse_session::{
    AuthApi, FetchUserOutcome, HttpAuthApi, InvalidationPolicy, LoginResponse, LogoutOutcome,
    RequestError, Session, SessionError, SessionEvent, SessionObserver, SessionStore, Token,
    TokenPersistence, TokenStore, UserProfile, TOKEN_KEY,
};
pub use gatehouse_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
