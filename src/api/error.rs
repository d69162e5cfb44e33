//! Uniform auth API error shape.
//!
//! Every failure leaving `AuthClient` is an `ApiError`: a human-readable
//! `message` for display plus the underlying `kind` for callers that need to
//! branch (e.g. on HTTP 401).

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const NO_RESPONSE_MESSAGE: &str = "no response received from server.";
pub const UNEXPECTED_MESSAGE: &str = "an unexpected error occurred";

/// The original failure behind an [`ApiError`].
#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error("server responded {status}")]
    Status { status: u16, body: String },
    #[error("no response: {0}")]
    NoResponse(#[source] reqwest::Error),
    #[error("unexpected: {0}")]
    Unexpected(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[source]
    pub kind: ApiErrorKind,
}

impl ApiError {
    /// Build the error for a non-2xx response, preferring the server's own text.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        let message = server_message(&body).unwrap_or_else(|| status_message(status));
        Self { message, kind: ApiErrorKind::Status { status, body } }
    }

    #[must_use]
    pub fn no_response(err: reqwest::Error) -> Self {
        Self { message: NO_RESPONSE_MESSAGE.to_owned(), kind: ApiErrorKind::NoResponse(err) }
    }

    #[must_use]
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self { message: UNEXPECTED_MESSAGE.to_owned(), kind: ApiErrorKind::Unexpected(detail.into()) }
    }

    /// Classify a transport error: nothing came back, or something else broke.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::no_response(err)
        } else {
            Self::unexpected(err.to_string())
        }
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ApiErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract the server's literal message from an error body.
///
/// A JSON object's `message` string wins; a JSON string or non-JSON text is
/// used verbatim (trimmed). Anything else yields `None`.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
            _ => None,
        },
        Ok(serde_json::Value::String(msg)) if !msg.is_empty() => Some(msg),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "bad request".to_owned(),
        401 => "invalid credentials".to_owned(),
        403 => "forbidden".to_owned(),
        404 => "not found".to_owned(),
        409 => "email already registered".to_owned(),
        500 => "internal server error".to_owned(),
        other => format!("Error {other}"),
    }
}
