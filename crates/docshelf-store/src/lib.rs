//! Document storage abstraction for Docshelf.
//!
//! This crate defines the [`DocumentStore`] trait — a flat namespace of
//! named text documents that knows nothing about rendering, sessions, or
//! HTTP. The server layer decides what a document means; this layer only
//! persists bytes under validated names.
//!
//! Two implementations are provided:
//!
//! - [`FsStore`] — production default, one file per document in a single
//!   flat directory
//! - [`MemoryStore`] — in-memory, for testing only

mod error;
mod fs_backend;
mod memory;

pub use error::StoreError;
pub use fs_backend::FsStore;
pub use memory::MemoryStore;

/// A flat store of named text documents.
///
/// Names are opaque UTF-8 strings that must be valid single path
/// segments — every operation rejects traversal sequences before any
/// backend work happens (see [`validate_name`]). Values are raw bytes;
/// extension-based rendering happens above this layer.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Enumerate the names of all documents in the store.
    ///
    /// Returns basenames only. Enumeration order is backend-dependent
    /// and not guaranteed to be stable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the underlying backend fails.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Check whether a document exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] for names that are not valid
    /// path segments, [`StoreError::Read`] if the backend fails.
    async fn exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Read a document's raw content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document is absent,
    /// [`StoreError::Read`] if the backend fails.
    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Create a document with the given content.
    ///
    /// No existence check is performed: an existing document at the same
    /// name is silently overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend fails.
    async fn create(&self, name: &str, content: &[u8]) -> Result<(), StoreError>;

    /// Overwrite a document's content in full, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend fails.
    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError>;

    /// Delete a document.
    ///
    /// Not idempotent — deleting an absent document is an error that
    /// propagates to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document is absent,
    /// [`StoreError::Delete`] if the backend fails.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// Validate a document name as a single safe path segment.
///
/// Rejects:
/// - empty names
/// - `.` and `..`
/// - any name containing a `..` sequence
/// - path separators (`/`, `\`)
/// - NUL bytes
///
/// # Errors
///
/// Returns [`StoreError::InvalidName`] on any violation.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(StoreError::InvalidName {
            name: name.to_owned(),
        });
    }

    Ok(())
}
