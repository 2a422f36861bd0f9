//! Filesystem store — the production default.
//!
//! One file per document in a single flat directory. The directory entry
//! *is* the document's only persisted state — no metadata sidecars, no
//! subdirectories. All filesystem calls are synchronous and dispatched
//! to a blocking thread via [`tokio::task::spawn_blocking`].
//!
//! Name validation happens here, before any path is joined, so a caller
//! can never reach the filesystem with a traversal sequence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{DocumentStore, StoreError, validate_name};

/// A document store backed by a flat directory.
///
/// Cheap to clone (the root path is the only state) and safe to share
/// across async tasks.
///
/// # Examples
///
/// ```no_run
/// # use docshelf_store::FsStore;
/// let store = FsStore::open("/var/lib/docshelf/data").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a document store rooted at the given directory.
    ///
    /// Creates the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the directory cannot be created
    /// or is not accessible.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| StoreError::Open {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %root.display(), "document store opened");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Return the store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait::async_trait]
impl DocumentStore for FsStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            let entries = std::fs::read_dir(&root).map_err(|e| StoreError::List {
                reason: e.to_string(),
            })?;

            let mut names = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| StoreError::List {
                    reason: e.to_string(),
                })?;
                let is_file = entry
                    .file_type()
                    .map_err(|e| StoreError::List {
                        reason: e.to_string(),
                    })?
                    .is_file();
                if !is_file {
                    continue;
                }
                // Non-UTF-8 names are not addressable as documents; skip them.
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
            Ok(names)
        })
        .await
        .map_err(|e| StoreError::List {
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.doc_path(name)?;
        let name = name.to_owned();
        tokio::task::spawn_blocking(move || match std::fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Read {
                name,
                reason: e.to_string(),
            }),
        })
        .await
        .map_err(|e| StoreError::Read {
            name: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.doc_path(name)?;
        let name = name.to_owned();
        tokio::task::spawn_blocking(move || {
            std::fs::read(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound { name: name.clone() },
                _ => StoreError::Read {
                    name: name.clone(),
                    reason: e.to_string(),
                },
            })
        })
        .await
        .map_err(|e| StoreError::Read {
            name: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        // Same write path as `write` — create performs no existence
        // check and silently overwrites.
        self.write(name, content).await
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        let path = self.doc_path(name)?;
        let name = name.to_owned();
        let content = content.to_vec();
        tokio::task::spawn_blocking(move || {
            std::fs::write(&path, &content).map_err(|e| StoreError::Write {
                name: name.clone(),
                reason: e.to_string(),
            })
        })
        .await
        .map_err(|e| StoreError::Write {
            name: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.doc_path(name)?;
        let name = name.to_owned();
        tokio::task::spawn_blocking(move || {
            std::fs::remove_file(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound { name: name.clone() },
                _ => StoreError::Delete {
                    name: name.clone(),
                    reason: e.to_string(),
                },
            })
        })
        .await
        .map_err(|e| StoreError::Delete {
            name: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }
}
