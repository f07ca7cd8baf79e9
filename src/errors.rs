use std::num::ParseIntError;

use serde::Deserialize;
use thiserror::Error;

/// A single field-validation failure reported by the API server when input
/// data is invalid (status code 400).
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize)]
#[error("{}", fmt_field_error(.field_names, .message))]
pub struct FieldError {
    /// Failure class, e.g. `DeserializationError`, `RequiredError`, `ValidationError`.
    #[serde(default)]
    pub classification: String,
    /// Names of the offending input fields; may be empty.
    #[serde(rename = "fieldNames", default)]
    pub field_names: Vec<String>,
    #[serde(default)]
    pub message: String,
}

fn fmt_field_error(field_names: &[String], message: &str) -> String {
    if field_names.is_empty() {
        message.to_owned()
    } else {
        format!("Invalid data for {}: {}", field_names.join(", "), message)
    }
}

fn fmt_bad_request(errors: &[FieldError]) -> String {
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    rendered.join("; ")
}

/// Errors returned by API operations.
///
/// Exactly one variant is produced per failed call; HTTP responses are
/// classified by status code and never mixed.
#[derive(Error, Debug)]
pub enum Error {
    /// The request body could not be encoded as JSON. Raised before any
    /// network activity.
    #[error("failed to encode request body")]
    Serialize(#[source] serde_json::Error),
    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response body")]
    Deserialize(#[source] serde_json::Error),
    /// Connection, DNS, or timeout failure from the underlying transport,
    /// passed through unchanged.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    /// The `X-Ratelimit-*` headers on a 429 response were missing or not
    /// numeric. Deliberately not defaulted to zero so callers can tell
    /// "rate limited with known bounds" apart from an unusable 429.
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    /// The server answered with a status code outside the documented set.
    #[error("Server returned bad status code ({0})")]
    BadStatusCode(u16),
    /// The server answered 200 with a non-JSON content type.
    #[error("Server returned bad content type ({0})")]
    BadContentType(String),
    /// The request quota was exceeded (status code 429). `reset` is the unix
    /// time at which the quota replenishes.
    #[error("Too many requests, retry after {reset} unix time")]
    TooManyRequests { limit: i64, reset: i64 },
    /// Input validation failed (status code 400).
    #[error("{}", fmt_bad_request(.0))]
    BadRequest(Vec<FieldError>),
    /// Input data was valid but the operation is not allowed (status
    /// code 403).
    #[error("{status}: {message}")]
    Forbidden { status: String, message: String },
}

/// Errors produced while building a [`Client`](crate::Client).
#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
