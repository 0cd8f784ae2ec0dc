//! Application route table

use std::sync::Arc;

use gatehouse_session::SessionStore;

use crate::guard::AuthGuard;
use crate::route::{RouteMeta, RouteRecord, ViewModule};
use crate::router::Router;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub fn app_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", DASHBOARD_PATH),
        RouteRecord::view(LOGIN_PATH, "login", || ViewModule::new("LoginView"))
            .with_meta(RouteMeta::guest()),
        RouteRecord::view(REGISTER_PATH, "register", || ViewModule::new("RegisterView"))
            .with_meta(RouteMeta::guest()),
        RouteRecord::view(DASHBOARD_PATH, "dashboard", || {
            ViewModule::new("DashboardView")
        })
        .with_meta(RouteMeta::requires_auth()),
    ]
}

/// The route table with the auth guard installed
pub fn app_router(session: SessionStore) -> Router {
    let router = Router::new(app_routes());
    router.before_each(Arc::new(AuthGuard::new(session)));
    router
}
