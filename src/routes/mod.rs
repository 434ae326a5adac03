//! HTTP route handlers.
//!
//! The router is assembled per [`Role`]: the JSON counting API, the HTML
//! form, or both. `/health` is always served. Every response gets an
//! `x-request-id` header from the request ID middleware.

pub mod api;
pub mod health;
pub mod web;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, CACHE_CONTROL_STATIC};
use crate::error::panic_response;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Which routes a process serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    /// Form and counting API in one process
    #[default]
    All,
    /// Counting API only
    Api,
    /// Form only; counts through the configured backend URL
    Web,
}

impl Role {
    pub fn serves_api(self) -> bool {
        matches!(self, Role::All | Role::Api)
    }

    pub fn serves_web(self) -> bool {
        matches!(self, Role::All | Role::Web)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::All => "all",
            Role::Api => "api",
            Role::Web => "web",
        }
    }
}

fn no_store() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
    )
}

/// Creates the Axum router for `role`.
pub fn create_router(state: AppState, role: Role) -> Router {
    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(no_store());

    let mut router = Router::new().merge(health_routes);

    if role.serves_api() {
        // Counting API - panics become JSON 500s, any origin may call it
        let api_routes = Router::new()
            .route("/api/count", post(api::count_characters))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(CorsLayer::permissive())
            .layer(no_store());
        router = router.merge(api_routes);
    }

    if role.serves_web() {
        // Form - stateful per submission, never cached
        let form_routes = Router::new()
            .route("/", get(web::index).post(web::submit))
            .layer(no_store());

        // Static files - long cache with immutable hint
        let static_routes = Router::new()
            .nest_service("/static", ServeDir::new(&state.config.ui.static_dir))
            .layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static(CACHE_CONTROL_STATIC),
            ));

        router = router.merge(form_routes).merge(static_routes);
    }

    router
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
