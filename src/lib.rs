//! # authgate
//!
//! Client-side authentication session lifecycle for the dashboard app:
//! durable session persistence, the auth API client, and the navigation
//! guard that decides every route transition.
//!
//! ARCHITECTURE
//! ============
//! `storage` is the durable key/value seam, `session` owns the in-memory
//! session and mirrors it write-through into storage, `api` talks to the
//! remote auth endpoints, `auth` composes the two, and `router` holds the
//! route table plus the guard evaluated against the session on each
//! navigation.

pub mod api;
pub mod auth;
pub mod config;
pub mod router;
pub mod session;
pub mod storage;

pub use api::{ApiError, AuthClient};
pub use auth::Auth;
pub use config::ClientConfig;
pub use router::{GuardDecision, Navigator, RouteTable};
pub use session::{Session, SessionStore};
pub use storage::KeyValueStore;
