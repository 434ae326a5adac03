//! HTTP server module.
//!
//! Binds the configured address, serves the router, and shuts down
//! gracefully on SIGTERM/SIGINT. TLS is left to the ingress in front of
//! the service.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
