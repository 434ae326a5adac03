//! JSON counting endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::instrument;

use crate::count::{self, CountPayload, CountResult, INVALID_NAME};
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/count`
///
/// Bodies that are not JSON, lack `name`, or carry a non-string `name` are
/// all rejected with 400. An empty string is counted normally.
#[instrument(name = "api::count", skip(state, payload))]
pub async fn count_characters(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CountResult>, ApiError> {
    let Json(value) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable count request body");
        ApiError::Validation(INVALID_NAME.to_string())
    })?;

    let request = CountPayload::from(value).into_request()?;
    let result = count::count(request, &state.identity);

    tracing::info!(
        name = %result.name,
        char_count = result.char_count,
        pod = %result.server_identity,
        "Character count request"
    );

    Ok(Json(result))
}
