//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Address(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse the configured listen address.
pub fn listen_addr(config: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Address(format!("{}", e)))
}

/// Start the HTTP server.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;
    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    // Setup graceful shutdown
    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_all_interfaces() {
        let config = HttpServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3001,
        };
        assert_eq!(listen_addr(&config).unwrap().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_listen_addr_rejects_hostname() {
        let config = HttpServerConfig {
            host: "not an address".to_string(),
            port: 3001,
        };
        assert!(matches!(listen_addr(&config), Err(ServerError::Address(_))));
    }
}
