//! Credential verification against a read-only user file.
//!
//! Users are managed out of band: a JSON object mapping username to
//! bcrypt hash, loaded once at startup and never mutated at runtime.
//! Verification uses bcrypt's salted, adaptive-cost comparison — never
//! raw equality. A failed lookup and a failed hash check are
//! indistinguishable to the caller, so responses leak no information
//! about which usernames exist.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::CredentialError;

/// A read-only mapping of username to bcrypt password hash.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    users: HashMap<String, String>,
}

impl Credentials {
    /// Load credentials from a JSON file of `{"username": "<bcrypt hash>"}`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Read`] if the file cannot be read,
    /// [`CredentialError::Parse`] if it is not a string-to-string JSON
    /// object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| CredentialError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let users: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| CredentialError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(count = users.len(), "credentials loaded");
        Ok(Self { users })
    }

    /// An empty credential set — every verification fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check a username/password pair.
    ///
    /// Returns `false` for unknown usernames, wrong passwords, and
    /// malformed stored hashes alike.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(hash) = self.users.get(username) else {
            return false;
        };
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}
