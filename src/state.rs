//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::client::CountBackend;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, the Tera template engine, the
/// resolved server identity, and the backend the form submits to.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    /// Identity reported as `pod`/`backend` in responses
    pub identity: Arc<str>,
    pub backend: Arc<dyn CountBackend>,
}

impl AppState {
    /// Creates a new application state, resolving the server identity from config.
    pub fn new(config: AppConfig, tera: Tera, backend: Arc<dyn CountBackend>) -> Self {
        let identity: Arc<str> = Arc::from(config.service.server_identity());
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            identity,
            backend,
        }
    }
}
