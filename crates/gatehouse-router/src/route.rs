//! Route descriptors

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Only reachable with a session
    pub requires_auth: bool,
    /// Only reachable without a session
    pub guest: bool,
}

impl RouteMeta {
    pub fn requires_auth() -> Self {
        Self {
            requires_auth: true,
            guest: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            requires_auth: false,
            guest: true,
        }
    }
}

/// A loaded view. Rendering is the caller's business; the router only
/// knows which component a route shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModule {
    pub component: String,
}

impl ViewModule {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }
}

type ViewLoader = dyn Fn() -> ViewModule + Send + Sync;

/// View reference resolved on first navigation and cached afterwards
pub struct LazyView {
    loader: Box<ViewLoader>,
    loaded: OnceLock<ViewModule>,
}

impl LazyView {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> ViewModule + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            loaded: OnceLock::new(),
        }
    }

    pub fn load(&self) -> &ViewModule {
        self.loaded.get_or_init(|| {
            let module = (self.loader)();
            tracing::debug!(component = %module.component, "Loaded view");
            module
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

impl std::fmt::Debug for LazyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyView")
            .field("loaded", &self.loaded.get())
            .finish()
    }
}

#[derive(Debug)]
pub enum RouteTarget {
    /// Unconditional redirect, followed before any guard runs
    Redirect(String),
    View(LazyView),
}

#[derive(Debug)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

impl RouteRecord {
    pub fn view<F>(path: &str, name: &str, loader: F) -> Self
    where
        F: Fn() -> ViewModule + Send + Sync + 'static,
    {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            target: RouteTarget::View(LazyView::new(loader)),
            meta: RouteMeta::default(),
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            target: RouteTarget::Redirect(to.to_string()),
            meta: RouteMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn lazy_view(&self) -> Option<&LazyView> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

/// A matched navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Matched route path
    pub path: String,
    /// Path as requested, query and fragment included
    pub full_path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
}

impl Location {
    pub(crate) fn new(record: &RouteRecord, full_path: &str) -> Self {
        Self {
            path: record.path.clone(),
            full_path: full_path.to_string(),
            name: record.name.clone(),
            meta: record.meta,
        }
    }
}

pub(crate) type SharedRoutes = Arc<Vec<RouteRecord>>;
