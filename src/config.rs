//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".authgate/session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeouts: Timeouts,
    pub session_file: PathBuf,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeouts: Timeouts::default(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            system_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `AUTHGATE_API_URL`: default `http://localhost:8081/api`
    /// - `AUTHGATE_TIMEOUT_SECS`: default 30
    /// - `AUTHGATE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `AUTHGATE_SESSION_FILE`: default `.authgate/session.json`
    /// - `AUTHGATE_NO_PROXY`: `1`/`true`/`yes`/`on` bypasses system proxies
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not an integer or the API URL is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("AUTHGATE_API_URL") {
            Some(raw) => normalize_api_url(&raw).ok_or(ConfigError::Empty { var: "AUTHGATE_API_URL" })?,
            None => DEFAULT_API_URL.to_owned(),
        };
        let timeouts = Timeouts {
            request_secs: parse_secs(
                "AUTHGATE_TIMEOUT_SECS",
                lookup("AUTHGATE_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_secs(
                "AUTHGATE_CONNECT_TIMEOUT_SECS",
                lookup("AUTHGATE_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };
        let session_file = lookup("AUTHGATE_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let system_proxy = !lookup("AUTHGATE_NO_PROXY").as_deref().and_then(parse_bool).unwrap_or(false);

        Ok(Self { api_url, timeouts, session_file, system_proxy })
    }

    /// Replace the API base URL, applying the same normalization as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] when `raw` is blank.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(raw).ok_or(ConfigError::Empty { var: "api url" })?;
        Ok(self)
    }
}

fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
