//! Auth API client for `/register`, `/login`, and `/profile`.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the network boundary only: it never touches the session store.
//! `crate::auth::Auth` feeds successful payloads into `SessionStore::set_auth`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is normalized into [`ApiError`] so callers can show
//! `err.message` directly. Business validation (empty password, ...) is the
//! caller's job; the client only does transport.


pub mod error;
pub mod types;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
pub use error::{ApiError, ApiErrorKind};
pub use types::{AuthPayload, Credentials, RegisterInput, User, UserId};
use types::RegisterRequest;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Build a client for `config.api_url` with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .default_headers(headers);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::unexpected(format!("http client build failed: {e}")))?;
        Ok(Self { http, base_url: config.api_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /register` with exactly `{username, email, password}`.
    ///
    /// The payload may or may not carry a token; check
    /// [`AuthPayload::session_parts`] before treating it as a login.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any transport or server failure.
    pub async fn register(&self, input: &RegisterInput, bearer: Option<&str>) -> Result<AuthPayload, ApiError> {
        let req = self.http.post(self.endpoint("/register")).json(&RegisterRequest::from(input));
        let body = self.send("/register", req, bearer).await?;
        decode_payload("/register", &body)
    }

    /// `POST /login` with `{email, password}`.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any transport or server failure.
    pub async fn login(&self, credentials: &Credentials, bearer: Option<&str>) -> Result<AuthPayload, ApiError> {
        let req = self.http.post(self.endpoint("/login")).json(credentials);
        let body = self.send("/login", req, bearer).await?;
        decode_payload("/login", &body)
    }

    /// `GET /profile` for the bearer's own user record.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any transport or server failure,
    /// including 401 when the token is missing or no longer accepted.
    pub async fn fetch_profile(&self, bearer: Option<&str>) -> Result<User, ApiError> {
        let req = self.http.get(self.endpoint("/profile"));
        let body = self.send("/profile", req, bearer).await?;
        decode("/profile", &body)
    }

    /// Session termination is local-only; no request is issued.
    pub fn logout(&self) {
        tracing::debug!(base_url = %self.base_url, "logout is local-only; no request sent");
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, path: &str, req: reqwest::RequestBuilder, bearer: Option<&str>) -> Result<String, ApiError> {
        let resp = with_bearer(req, bearer).send().await.map_err(|e| transport_failure(path, e))?;

        let status = resp.status();
        if !status.is_success() {
            // A timeout while the error body streams is still "no response".
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(transport_failure(path, e)),
                Err(e) => {
                    tracing::debug!(%path, error = %e, "error body unreadable; using status catalogue");
                    String::new()
                }
            };
            let err = ApiError::from_status(status.as_u16(), body);
            tracing::warn!(%path, status = status.as_u16(), message = %err.message, "auth request rejected");
            return Err(err);
        }

        tracing::debug!(%path, status = status.as_u16(), "auth request succeeded");
        resp.text().await.map_err(|e| transport_failure(path, e))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Attach `Authorization: Bearer <token>` when a non-empty token is supplied.
fn with_bearer(req: reqwest::RequestBuilder, bearer: Option<&str>) -> reqwest::RequestBuilder {
    match bearer.map(str::trim).filter(|t| !t.is_empty()) {
        Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
        None => req,
    }
}

fn transport_failure(path: &str, err: reqwest::Error) -> ApiError {
    tracing::warn!(%path, error = %err, "auth request failed without a complete response");
    ApiError::from_transport(err)
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::unexpected(format!("decode {path} response: {e}")))
}

/// Auth payloads tolerate an empty body (register without auto-login).
fn decode_payload(path: &str, body: &str) -> Result<AuthPayload, ApiError> {
    if body.trim().is_empty() {
        return Ok(AuthPayload::default());
    }
    decode(path, body)
}
