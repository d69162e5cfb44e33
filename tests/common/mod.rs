//! In-process fake auth API for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use authgate::api::AuthClient;
use authgate::auth::Auth;
use authgate::config::ClientConfig;
use authgate::session::SessionStore;
use authgate::storage::KeyValueStore;
use axum::Router;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::{MethodRouter, any};

/// One request as the fake server saw it.
#[derive(Clone, Debug)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Shared request log.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Seen>>>);

impl Log {
    pub fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let seen = Seen {
            method,
            path: uri.path().to_owned(),
            authorization: headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
            body: serde_json::from_slice(body).ok(),
        };
        self.0.lock().unwrap().push(seen);
    }

    pub fn all(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Route that records every request and answers `status` with a fixed body.
///
/// Bodies that look like JSON are sent as `application/json`, anything else
/// as `text/plain`.
pub fn respond_with(log: &Log, status: StatusCode, body: &'static str) -> MethodRouter {
    let log = log.clone();
    let content_type = if body.starts_with('{') || body.starts_with('"') { "application/json" } else { "text/plain" };
    any(move |method: Method, uri: Uri, headers: HeaderMap, bytes: Bytes| {
        let log = log.clone();
        async move {
            log.record(method, &uri, &headers, &bytes);
            (status, [(CONTENT_TYPE, content_type)], body)
        }
    })
}

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default().with_api_url(base_url).unwrap();
    config.system_proxy = false;
    config
}

pub fn auth_with<S: KeyValueStore>(base_url: &str, storage: S) -> Auth<S> {
    let client = AuthClient::new(&config(base_url)).unwrap();
    let mut auth = Auth::new(client, SessionStore::new(storage));
    auth.initialize();
    auth
}
