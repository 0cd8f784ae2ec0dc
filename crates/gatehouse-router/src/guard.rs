//! Navigation guards

use gatehouse_session::SessionStore;

use crate::route::{Location, RouteMeta};
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Runs before every transition. Must not mutate session state.
pub trait NavigationGuard: Send + Sync {
    fn check(&self, to: &Location, from: Option<&Location>) -> GuardDecision;
}

/// The auth rules, in order. `requires_auth` wins over `guest`.
pub fn evaluate(meta: &RouteMeta, authenticated: bool) -> GuardDecision {
    if meta.requires_auth && !authenticated {
        GuardDecision::Redirect(LOGIN_PATH.to_string())
    } else if meta.guest && authenticated {
        GuardDecision::Redirect(DASHBOARD_PATH.to_string())
    } else {
        GuardDecision::Proceed
    }
}

pub struct AuthGuard {
    session: SessionStore,
}

impl AuthGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl NavigationGuard for AuthGuard {
    fn check(&self, to: &Location, _from: Option<&Location>) -> GuardDecision {
        let decision = evaluate(&to.meta, self.session.is_authenticated());
        if let GuardDecision::Redirect(target) = &decision {
            tracing::debug!(to = %to.path, redirect = %target, "Auth guard redirected navigation");
        }
        decision
    }
}
