//! Shared helpers for router tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{self, Request};
use http_body_util::BodyExt;

use character_counter::client::{ClientError, CountBackend};
use character_counter::config::AppConfig;
use character_counter::count::{count, CountRequest, CountResult};
use character_counter::state::AppState;
use character_counter::templates::init_templates;

pub const TEST_POD: &str = "test-pod-1";

/// Backend that counts locally and records how often it was called.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl FakeBackend {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountBackend for FakeBackend {
    async fn count(&self, name: &str) -> Result<CountResult, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClientError::Status(503));
        }
        Ok(count(
            CountRequest {
                name: name.to_string(),
            },
            "backend-pod-9",
        ))
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.service.pod_name = Some(TEST_POD.to_string());
    config.ui.templates_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string();
    config.ui.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string();
    config
}

pub fn test_state(backend: Arc<FakeBackend>) -> AppState {
    let config = test_config();
    let tera = init_templates(&config.ui.templates_dir).unwrap();
    AppState::new(config, tera, backend)
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

pub fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

pub fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}
