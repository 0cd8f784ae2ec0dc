//! Router
//!
//! Matches a path against the route table, follows redirect entries, runs
//! the registered guards and records the result in history.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::error::RouterError;
use crate::guard::{GuardDecision, NavigationGuard};
use crate::history::{History, HistoryEntry};
use crate::route::{Location, RouteRecord, RouteTarget, SharedRoutes, ViewModule};
use crate::Result;

/// Upper bound on redirects followed by a single navigation
pub const MAX_REDIRECTS: usize = 10;

/// A completed navigation
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub location: Location,
    pub view: ViewModule,
    /// The originally requested path when a redirect or guard moved us
    pub redirected_from: Option<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

pub struct Router {
    routes: SharedRoutes,
    guards: Arc<RwLock<Vec<Arc<dyn NavigationGuard>>>>,
    history: Arc<RwLock<History>>,
}

impl Router {
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self {
            routes: Arc::new(routes),
            guards: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(History::new())),
        }
    }

    /// Register a guard. Guards run in registration order; the first
    /// redirect wins.
    pub fn before_each(&self, guard: Arc<dyn NavigationGuard>) {
        self.guards.write().push(guard);
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Path of the route registered under `name`
    pub fn resolve_name(&self, name: &str) -> Result<&str> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .map(|r| r.path.as_str())
            .ok_or_else(|| RouterError::UnknownName(name.to_string()))
    }

    pub fn current(&self) -> Option<Location> {
        self.history.read().current().cloned()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().entries().to_vec()
    }

    pub fn navigate(&self, to: &str) -> Result<Navigation> {
        let navigation = self.resolve(to)?;
        self.history.write().push(navigation.location.clone());

        tracing::info!(
            path = %navigation.location.path,
            redirected_from = ?navigation.redirected_from,
            "Navigated"
        );

        Ok(navigation)
    }

    /// Match, follow redirects and guard `to` without touching history
    fn resolve(&self, to: &str) -> Result<Navigation> {
        let mut target = to.to_string();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let record = self.match_path(&target)?;

            let view = match &record.target {
                RouteTarget::Redirect(destination) => {
                    tracing::debug!(from = %target, to = %destination, "Following route redirect");
                    redirected_from.get_or_insert_with(|| to.to_string());
                    target = destination.clone();
                    continue;
                }
                RouteTarget::View(view) => view,
            };

            let location = Location::new(record, &target);

            if let Some(redirect) = self.run_guards(&location) {
                redirected_from.get_or_insert_with(|| to.to_string());
                target = redirect;
                continue;
            }

            return Ok(Navigation {
                location,
                view: view.load().clone(),
                redirected_from,
            });
        }

        tracing::warn!(to = %to, "Navigation aborted: redirect loop");
        Err(RouterError::RedirectLoop(to.to_string()))
    }

    pub fn navigate_to_name(&self, name: &str) -> Result<Navigation> {
        let path = self.resolve_name(name)?.to_string();
        self.navigate(&path)
    }

    /// Go back one entry, re-running the guards. `None` when there is
    /// nothing to go back to. History is left as it was if the
    /// navigation fails.
    pub fn back(&self) -> Result<Option<Navigation>> {
        let Some(previous) = self.history.read().previous().cloned() else {
            return Ok(None);
        };

        let navigation = self.resolve(&previous.full_path)?;
        self.history.write().step_back(navigation.location.clone());

        tracing::info!(
            path = %navigation.location.path,
            redirected_from = ?navigation.redirected_from,
            "Navigated back"
        );

        Ok(Some(navigation))
    }

    fn run_guards(&self, to: &Location) -> Option<String> {
        let guards = self.guards.read().clone();
        let from = self.current();

        guards
            .iter()
            .find_map(|guard| match guard.check(to, from.as_ref()) {
                GuardDecision::Proceed => None,
                GuardDecision::Redirect(path) => Some(path),
            })
    }

    fn match_path(&self, target: &str) -> Result<&RouteRecord> {
        let path = normalize_path(target);
        self.routes
            .iter()
            .find(|r| r.path == path)
            .ok_or_else(|| RouterError::NotFound(target.to_string()))
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            guards: Arc::clone(&self.guards),
            history: Arc::clone(&self.history),
        }
    }
}

/// Strip query and fragment, and any trailing slash except the root's
fn normalize_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let path = target[..end].trim_end_matches('/');
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
