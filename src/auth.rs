//! Login/register/logout flows over the auth client and session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `Auth` value is built at startup and threaded to whatever needs the
//! session (navigation, UI, CLI commands). It is the only place that turns
//! API payloads into session mutations.
//!
//! DESIGN
//! ======
//! Flows take `&mut self`, so a pending `login`/`register` holds the facade
//! and `logout` cannot interleave with it. Callers must still prevent
//! duplicate submits; in-flight requests are never cancelled.

use crate::api::{ApiError, AuthClient, AuthPayload, Credentials, RegisterInput, User};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;

pub struct Auth<S> {
    client: AuthClient,
    store: SessionStore<S>,
}

impl<S: KeyValueStore> Auth<S> {
    pub fn new(client: AuthClient, store: SessionStore<S>) -> Self {
        Self { client, store }
    }

    /// Rehydrate the session from durable storage.
    pub fn initialize(&mut self) {
        self.store.initialize();
    }

    /// Log in and start a session from the returned token and user.
    ///
    /// # Errors
    ///
    /// Returns the client's [`ApiError`] unchanged, or an "unexpected" error
    /// when a 2xx response lacks a token or user. The session is untouched on
    /// any error.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        let payload = self.client.login(credentials, self.store.token()).await?;
        let Some((token, user)) = payload.session_parts() else {
            tracing::warn!(email = %credentials.email, "login response missing token or user");
            return Err(ApiError::unexpected("login response missing token or user"));
        };
        self.store.set_auth(token, user);
        Ok(payload)
    }

    /// Register a user; starts a session only if the server returned a token.
    ///
    /// # Errors
    ///
    /// Returns the client's [`ApiError`] unchanged.
    pub async fn register(&mut self, input: &RegisterInput) -> Result<AuthPayload, ApiError> {
        let payload = self.client.register(input, self.store.token()).await?;
        match payload.session_parts() {
            Some((token, user)) => self.store.set_auth(token, user),
            None => tracing::info!(email = %input.email, "registered without auto-login"),
        }
        Ok(payload)
    }

    /// End the session locally. No request is sent.
    pub fn logout(&mut self) {
        self.client.logout();
        self.store.clear_auth();
    }

    /// Re-fetch the signed-in user's profile and store it.
    ///
    /// A 401 means the token is no longer accepted, so the session is cleared.
    ///
    /// # Errors
    ///
    /// Returns the client's [`ApiError`].
    pub async fn refresh_profile(&mut self) -> Result<User, ApiError> {
        match self.client.fetch_profile(self.store.token()).await {
            Ok(user) => {
                self.store.update_user(&user);
                Ok(user)
            }
            Err(err) => {
                if err.status() == Some(401) && self.store.is_authenticated() {
                    tracing::warn!("token rejected by server; clearing session");
                    self.store.clear_auth();
                }
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.store.user()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.store.session()
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }
}
