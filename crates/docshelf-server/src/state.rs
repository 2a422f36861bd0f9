//! Shared application state for the Docshelf server.
//!
//! A single [`AppState`] is constructed at startup and shared across
//! all Axum handlers via `Arc`. It holds the document store, the
//! content renderer, the read-only credential set, and the session
//! store.

use std::sync::Arc;

use docshelf_core::credentials::Credentials;
use docshelf_core::render::ContentRenderer;
use docshelf_core::session::SessionStore;
use docshelf_store::DocumentStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The document store (filesystem in production, memory in tests).
    pub store: Arc<dyn DocumentStore>,
    /// Extension-driven content renderer.
    pub renderer: ContentRenderer,
    /// Username → bcrypt hash mapping, loaded once at startup.
    pub credentials: Credentials,
    /// Per-client session state keyed by cookie token.
    pub sessions: SessionStore,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
