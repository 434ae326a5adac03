//! Character counter: a JSON counting service and the web form that calls it.
//!
//! `POST /api/count` takes `{"name": "..."}` and answers with the name's
//! length in UTF-16 code units plus the identity of the answering instance.
//! The form at `/` submits to that endpoint over HTTP and renders the result.

pub mod client;
pub mod config;
pub mod count;
pub mod error;
pub mod form;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::*;
