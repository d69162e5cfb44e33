//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "is a user authenticated". The navigation guard
//! reads it on every transition; only `set_auth` and `clear_auth` mutate it.
//! Both mutations write through to durable storage before returning, so the
//! `token` and `user` keys always mirror memory once a call completes.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. Storage write errors are logged and the in-memory
//! session is still updated; a corrupted stored user is discarded.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::types::User;
use crate::storage::KeyValueStore;

/// Durable key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Durable key holding the JSON-serialized user.
pub const USER_KEY: &str = "user";

/// In-memory authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// True iff a non-empty token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Owns the session and the storage backend it mirrors into.
#[derive(Debug)]
pub struct SessionStore<S> {
    session: Session,
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Empty session over `storage`. Call [`SessionStore::initialize`] to rehydrate.
    pub fn new(storage: S) -> Self {
        Self { session: Session::default(), storage }
    }

    /// Rehydrate the session from durable storage.
    ///
    /// A stored user that is not valid JSON is removed from storage. Valid
    /// JSON that is not a user object is left in storage but not loaded. A
    /// stored user with no stored token is an orphan and is removed.
    pub fn initialize(&mut self) {
        self.session = Session::default();

        if let Some(token) = self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty()) {
            self.session.token = Some(token);
        }

        let Some(raw_user) = self.storage.get_item(USER_KEY) else {
            tracing::debug!(authenticated = self.session.is_authenticated(), "session initialized");
            return;
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) if self.session.token.is_some() => self.session.user = Some(user),
            Ok(_) => {
                tracing::info!("discarding stored user without a token");
                self.remove_key(USER_KEY);
            }
            Err(e) if e.is_data() => {
                tracing::warn!(error = %e, "stored user is not a user object; ignoring it");
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored user is corrupted; discarding it");
                self.remove_key(USER_KEY);
            }
        }
        tracing::debug!(authenticated = self.session.is_authenticated(), "session initialized");
    }

    /// Start a session: set token and user in memory and in storage.
    ///
    /// An empty token cannot start a session; the store is cleared instead.
    pub fn set_auth(&mut self, token: &str, user: &User) {
        if token.is_empty() {
            tracing::warn!("refusing to start a session with an empty token");
            self.clear_auth();
            return;
        }

        self.session = Session { token: Some(token.to_owned()), user: Some(user.clone()) };

        if let Err(e) = self.storage.set_item(TOKEN_KEY, token) {
            tracing::warn!(key = TOKEN_KEY, error = %e, "failed to persist session");
        }
        self.write_user(user);
        tracing::info!(user_id = ?user.id, "session started");
    }

    /// Replace the stored user of an active session (e.g. after a profile refresh).
    ///
    /// Does nothing when no session is active.
    pub fn update_user(&mut self, user: &User) {
        if !self.session.is_authenticated() {
            tracing::debug!("ignoring user update without an active session");
            return;
        }
        self.session.user = Some(user.clone());
        self.write_user(user);
    }

    /// End the session: clear memory and remove both durable keys.
    pub fn clear_auth(&mut self) {
        let was_authenticated = self.session.is_authenticated();
        self.session = Session::default();
        self.remove_key(TOKEN_KEY);
        self.remove_key(USER_KEY);
        if was_authenticated {
            tracing::info!("session cleared");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write_user(&mut self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(e) = self.storage.set_item(USER_KEY, &raw) {
                    tracing::warn!(key = USER_KEY, error = %e, "failed to persist session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize user"),
        }
    }

    fn remove_key(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            tracing::warn!(%key, error = %e, "failed to remove session key");
        }
    }
}
