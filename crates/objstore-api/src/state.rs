//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor: configuration and the object store.
//! Per-request state lives in [`objstore_core::RequestContext`], created
//! by each handler.

use objstore_core::{MemoryStore, RequestContext, RouteParams, Settings};

/// Process configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Backend settings, including feature flags.
    pub settings: Settings,
}

impl AppConfig {
    /// Build configuration from `PORT` and `OBJSTORE_*` variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8888);
        Self {
            port,
            settings: Settings::from_env(),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: MemoryStore,
}

impl AppState {
    /// State with default configuration (schema validation off).
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given configuration and an empty store.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            storage: MemoryStore::new(),
        }
    }

    /// Open the request-scoped context for one handler invocation.
    pub fn request_context(&self, route: RouteParams) -> RequestContext<'_> {
        RequestContext::new(route, self.config.settings, &self.storage)
    }
}
