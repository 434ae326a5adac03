//! Character counter entry point.
//!
//! Initializes tracing, loads configuration from TOML and the environment,
//! builds the backend client the form uses, sets up the Axum router for the
//! selected role, and starts the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use character_counter::client::HttpCountClient;
use character_counter::config::{AppConfig, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use character_counter::http::start_server;
use character_counter::routes::{create_router, Role};
use character_counter::state::AppState;
use character_counter::templates::init_templates;

/// Character counter: counts the characters in a name
#[derive(Parser, Debug)]
#[command(name = "character-counter", version, about)]
struct Args {
    /// Path to configuration file [default: config/default.toml]
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "character_counter=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Which routes to serve
    #[arg(short, long, value_enum, default_value_t = Role::All)]
    role: Role,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration; the default path may be absent
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = AppConfig::load_or_default(config_path, args.config.is_none())?;
    config.apply_env(|key| std::env::var(key).ok())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let json = config.logging.format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(path = %config_path, "Loaded configuration");

    let tera = init_templates(&config.ui.templates_dir)?;
    tracing::info!("Initialized templates");

    let endpoint = config.frontend.count_endpoint(config.http.port);
    let backend = HttpCountClient::new(
        &endpoint,
        Duration::from_secs(config.frontend.request_timeout_seconds),
    )?;
    if args.role == Role::Web && config.frontend.is_relative() {
        tracing::warn!(
            backend_url = %config.frontend.backend_url,
            "Relative backend URL in web role points at this process, which does not serve the API"
        );
    }
    tracing::info!(
        endpoint = %backend.endpoint(),
        timeout_secs = config.frontend.request_timeout_seconds,
        "Configured counting service client"
    );

    let http_config = config.http.clone();
    let state = AppState::new(config, tera, Arc::new(backend));

    tracing::info!(
        service = %state.config.service.name,
        port = http_config.port,
        pod = %state.identity,
        environment = %state.config.service.environment,
        role = args.role.as_str(),
        "Character counter service starting"
    );

    let app = create_router(state, args.role);
    start_server(app, &http_config).await?;

    Ok(())
}
