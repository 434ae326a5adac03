//! Character counting.
//!
//! Lengths are measured in UTF-16 code units so results agree with clients
//! that count the way browsers do: `"😀"` is 2, a precomposed `"é"` is 1.
//! Grapheme clusters are not considered.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Raw request body for `POST /api/count`.
///
/// `name` is kept as an untyped JSON value so that a missing field and a
/// field of the wrong type are rejected the same way.
#[derive(Debug, Default)]
pub struct CountPayload {
    pub name: Option<serde_json::Value>,
}

impl From<serde_json::Value> for CountPayload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(mut map) => Self {
                name: map.remove("name"),
            },
            _ => Self::default(),
        }
    }
}

impl CountPayload {
    /// Validate the payload. `""` is a valid name.
    pub fn into_request(self) -> Result<CountRequest, ApiError> {
        match self.name {
            Some(serde_json::Value::String(name)) => Ok(CountRequest { name }),
            _ => Err(ApiError::Validation(INVALID_NAME.to_string())),
        }
    }
}

/// Error text for a missing or non-string name
pub const INVALID_NAME: &str = "Invalid input: name is required and must be a string";

/// A validated count request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    pub name: String,
}

/// Result of counting one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    pub name: String,
    pub char_count: usize,
    /// Identity of the responding server
    #[serde(rename = "backend", default)]
    pub server_identity: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub message: String,
}

/// Number of UTF-16 code units in `s`.
pub fn code_unit_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// `"character"` or `"characters"` for `count`.
pub fn character_noun(count: usize) -> &'static str {
    if count == 1 {
        "character"
    } else {
        "characters"
    }
}

/// Human-readable summary, e.g. `"Alice" has 5 characters`.
pub fn summary_message(name: &str, count: usize) -> String {
    format!("\"{}\" has {} {}", name, count, character_noun(count))
}

/// Current time as ISO-8601 UTC with millisecond precision.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Count the characters in a request and attach server metadata.
pub fn count(request: CountRequest, server_identity: &str) -> CountResult {
    let char_count = code_unit_len(&request.name);
    let message = summary_message(&request.name, char_count);
    CountResult {
        name: request.name,
        char_count,
        server_identity: server_identity.to_string(),
        timestamp: iso_timestamp(),
        message,
    }
}
