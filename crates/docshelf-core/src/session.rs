//! Session store and flash messages.
//!
//! Sessions are keyed by an opaque token (UUID v4, 128 bits of OS
//! CSPRNG randomness) carried in a client cookie. The payload is small:
//! a signed-in flag, the username, and an optional one-shot flash
//! message. Sessions live in process memory only — nothing survives a
//! restart, which is all the cookie transport promises anyway.
//!
//! The flash message is write-once-read-once: any operation may set it
//! (the latest write wins) and the next rendered page consumes it via
//! [`SessionStore::take_flash`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

/// Flash message set when a user signs in.
pub const FLASH_WELCOME: &str = "Welcome";

/// Flash message set when a user signs out.
pub const FLASH_SIGNED_OUT: &str = "You have been signed out";

/// Flash message shown when an unauthenticated client hits a protected
/// operation.
pub const FLASH_AUTH_REQUIRED: &str = "You have to be logged in to do that.";

/// Per-client session state.
#[derive(Debug, Clone)]
struct Session {
    signed_in: bool,
    username: Option<String>,
    flash: Option<String>,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            signed_in: false,
            username: None,
            flash: None,
            created_at: Utc::now(),
        }
    }
}

/// Process-wide session store keyed by opaque client token.
///
/// Cheap to clone; clones share state. There is no server-side expiry —
/// session lifetime is the client cookie's lifetime.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Create a new empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new anonymous session and return its opaque token.
    pub async fn create(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), Session::new());
        token
    }

    /// Whether a session exists for this token.
    pub async fn exists(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(token)
    }

    /// Whether the session is signed in.
    ///
    /// Unknown tokens are never signed in.
    pub async fn is_signed_in(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.get(token).is_some_and(|s| s.signed_in)
    }

    /// The username attached to a signed-in session.
    pub async fn username(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(token).and_then(|s| s.username.clone())
    }

    /// Mark the session as signed in and set the welcome flash.
    ///
    /// Callers invoke this only after a successful credential check —
    /// the store itself never flips `signed_in` any other way.
    pub async fn sign_in(&self, token: &str, username: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.signed_in = true;
            session.username = Some(username.to_owned());
            session.flash = Some(FLASH_WELCOME.to_owned());
            info!(username = %username, "user signed in");
        }
    }

    /// Clear the signed-in state and set the signed-out flash.
    pub async fn sign_out(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            if let Some(username) = session.username.take() {
                info!(username = %username, "user signed out");
            }
            session.signed_in = false;
            session.flash = Some(FLASH_SIGNED_OUT.to_owned());
        }
    }

    /// Set the pending flash message, replacing any previous one.
    pub async fn set_flash(&self, token: &str, message: impl Into<String>) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            session.flash = Some(message.into());
        }
    }

    /// Consume the pending flash message, clearing it.
    pub async fn take_flash(&self, token: &str) -> Option<String> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(token).and_then(|s| s.flash.take())
    }
}
