//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use gatehouse_session::InvalidationPolicy;

use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

pub const ENV_API_URL: &str = "GATEHOUSE_API_URL";
pub const ENV_DATABASE: &str = "GATEHOUSE_DATABASE";
pub const ENV_INVALIDATION: &str = "GATEHOUSE_INVALIDATION";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL the auth endpoints are resolved against
    pub api_base_url: String,
    /// Path to the storage database holding the persisted token
    pub database_path: PathBuf,
    pub user_agent: String,
    /// Which `/user` failures drop the session
    #[serde(default)]
    pub invalidation_policy: InvalidationPolicy,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_path: data_dir.join("gatehouse.db"),
            user_agent: format!("gatehouse/{}", env!("CARGO_PKG_VERSION")),
            invalidation_policy: InvalidationPolicy::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("gatehouse"))
            .unwrap_or_else(|| PathBuf::from(".gatehouse"))
    }

    /// Defaults overlaid with `GATEHOUSE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }

        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }

        if let Some(policy) = lookup(ENV_INVALIDATION).filter(|v| !v.trim().is_empty()) {
            self.invalidation_policy = policy
                .parse()
                .map_err(|e: String| CoreError::Config(format!("{ENV_INVALIDATION}: {e}")))?;
        }

        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Per-platform data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
