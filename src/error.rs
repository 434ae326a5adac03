use std::any::Any;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors returned by the JSON counting API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad or missing input; the caller can fix it
    #[error("{0}")]
    Validation(String),

    /// Unexpected fault while handling the request
    #[error("{0}")]
    Internal(String),
}

/// JSON body for API errors.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `error` field for every 500 response
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiErrorBody {
        match self {
            ApiError::Validation(message) => ApiErrorBody {
                error: message.clone(),
                message: None,
            },
            ApiError::Internal(message) => ApiErrorBody {
                error: INTERNAL_SERVER_ERROR.to_string(),
                message: Some(message.clone()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(message) => {
                tracing::debug!(error = %message, "Rejected count request");
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Error processing request");
            }
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// Convert a handler panic into the API's 500 response.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    ApiError::Internal(message).into_response()
}

/// Errors returned by the HTML form handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Internal error: {:?}", self);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = "Internal server error";

        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
    <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
    <div class="container">
        <div class="error-page">
            <h1>Error {}</h1>
            <p>{}</p>
            <a href="/">Return to the counter</a>
        </div>
    </div>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, Html(body)).into_response()
    }
}
