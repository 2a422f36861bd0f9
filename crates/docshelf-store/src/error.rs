//! Storage error types.
//!
//! Every error variant carries enough context to diagnose the problem
//! without a debugger. Reasons come from the underlying I/O error; they
//! are for logs, not for HTTP response bodies.

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named document does not exist in the store.
    #[error("document not found: {name}")]
    NotFound { name: String },

    /// The document name is not a valid path segment (empty, traversal
    /// sequence, path separator, or NUL byte).
    #[error("invalid document name: {name:?}")]
    InvalidName { name: String },

    /// Failed to open or create the store directory.
    #[error("failed to open store at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read a document's content.
    #[error("failed to read document '{name}': {reason}")]
    Read { name: String, reason: String },

    /// Failed to write a document's content.
    #[error("failed to write document '{name}': {reason}")]
    Write { name: String, reason: String },

    /// Failed to delete a document.
    #[error("failed to delete document '{name}': {reason}")]
    Delete { name: String, reason: String },

    /// Failed to enumerate the store directory.
    #[error("failed to list documents: {reason}")]
    List { reason: String },
}
