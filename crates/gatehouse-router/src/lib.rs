//! Gatehouse Router
//!
//! Route table plus the navigation guard. For every transition:
//! 1. `requires_auth` and not logged in → `/login`
//! 2. `guest` and logged in → `/dashboard`
//! 3. otherwise proceed
//!
//! Routes:
//! - `/` → redirect to `/dashboard`
//! - `/login`, `/register`: guests only
//! - `/dashboard`: requires auth

mod error;
mod guard;
mod history;
mod route;
mod router;
mod routes;

pub use error::RouterError;
pub use guard::{evaluate, AuthGuard, GuardDecision, NavigationGuard};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use route::{LazyView, Location, RouteMeta, RouteRecord, RouteTarget, ViewModule};
pub use router::{Navigation, Router, MAX_REDIRECTS};
pub use routes::{app_router, app_routes, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};

pub type Result<T> = std::result::Result<T, RouterError>;
