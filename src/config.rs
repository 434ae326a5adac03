//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file, applies environment
//! overrides, and defines constants for HTTP cache headers, logging and
//! default paths. `AppConfig` is the root configuration struct.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Static assets (CSS, JS) - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

/// API responses, health checks and the form are never cached
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Service Defaults
// =============================================================================

/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;

/// Default listen address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Name reported by the health endpoint
pub const DEFAULT_SERVICE_NAME: &str = "character-counter-backend";

/// Environment name when APP_ENV is not set
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Identity reported when neither a pod name nor a hostname is available
pub const UNKNOWN_POD: &str = "unknown";

// =============================================================================
// Client Defaults
// =============================================================================

/// Base URL of the counting service as seen by the form
pub const DEFAULT_BACKEND_URL: &str = "/api";

/// Outbound request timeout for the form's backend call
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default template directory
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default static asset directory
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default page title
pub const DEFAULT_SITE_NAME: &str = "Character Counter";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "character_counter=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

// Environment variables read at startup
pub const ENV_PORT: &str = "PORT";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
pub const ENV_POD_NAME: &str = "POD_NAME";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Service identity settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Settings for the form's call to the counting service
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }
}

/// Service identity settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name reported by `/health`
    #[serde(default = "ServiceConfig::default_name")]
    pub name: String,
    /// Environment name, logged at startup only
    #[serde(default = "ServiceConfig::default_environment")]
    pub environment: String,
    /// Explicit server identity. Falls back to the OS hostname.
    pub pod_name: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            environment: Self::default_environment(),
            pod_name: None,
        }
    }
}

impl ServiceConfig {
    fn default_name() -> String {
        DEFAULT_SERVICE_NAME.to_string()
    }

    fn default_environment() -> String {
        DEFAULT_ENVIRONMENT.to_string()
    }

    /// Resolve the identity reported in responses: configured pod name,
    /// then hostname, then a fixed placeholder.
    pub fn server_identity(&self) -> String {
        self.pod_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(sysinfo::System::host_name)
            .unwrap_or_else(|| UNKNOWN_POD.to_string())
    }
}

/// Settings for the form's outbound call
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Base URL of the counting service. Relative values are resolved
    /// against this process's own listen port.
    #[serde(default = "FrontendConfig::default_backend_url")]
    pub backend_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "FrontendConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            backend_url: Self::default_backend_url(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

impl FrontendConfig {
    fn default_backend_url() -> String {
        DEFAULT_BACKEND_URL.to_string()
    }

    fn default_request_timeout() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    /// Absolute URL of the count endpoint for a process listening on `port`.
    pub fn count_endpoint(&self, port: u16) -> String {
        let base = self.backend_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}/count", base)
        } else {
            let path = base.trim_start_matches('/');
            if path.is_empty() {
                format!("http://127.0.0.1:{}/count", port)
            } else {
                format!("http://127.0.0.1:{}/{}/count", port, path)
            }
        }
    }

    /// Whether the backend URL points back at this process.
    pub fn is_relative(&self) -> bool {
        !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Page title
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    #[serde(default = "UiConfig::default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "UiConfig::default_static_dir")]
    pub static_dir: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: Self::default_site_name(),
            templates_dir: Self::default_templates_dir(),
            static_dir: Self::default_static_dir(),
            version: Self::default_version(),
        }
    }
}

impl UiConfig {
    fn default_site_name() -> String {
        DEFAULT_SITE_NAME.to_string()
    }

    fn default_templates_dir() -> String {
        DEFAULT_TEMPLATES_DIR.to_string()
    }

    fn default_static_dir() -> String {
        DEFAULT_STATIC_DIR.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> LogFormat {
        LogFormat::Text
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load configuration, tolerating a missing file when `optional` is set.
    pub fn load_or_default<P: AsRef<Path>>(path: P, optional: bool) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if optional && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(env) = lookup(ENV_APP_ENV).filter(|v| !v.is_empty()) {
            self.service.environment = env;
        }
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.frontend.backend_url = url;
        }
        if let Some(pod) = lookup(ENV_POD_NAME).filter(|v| !v.is_empty()) {
            self.service.pod_name = Some(pod);
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frontend.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "frontend.request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
