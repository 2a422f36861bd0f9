//! In-memory store for testing.
//!
//! Documents live in a `BTreeMap` behind a `RwLock`. Nothing is
//! persistent — all data is lost when the process exits. Use this for
//! unit and integration tests that need a real store without touching
//! disk.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{DocumentStore, StoreError, validate_name};

/// An in-memory document store backed by a `BTreeMap`.
///
/// Thread-safe and async-compatible. Clones share state.
///
/// # Examples
///
/// ```
/// # use docshelf_store::{DocumentStore, MemoryStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.create("about.txt", b"hello").await.unwrap();
/// assert_eq!(store.read("about.txt").await.unwrap(), b"hello".to_vec());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.keys().cloned().collect())
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        validate_name(name)?;
        let docs = self.docs.read().await;
        Ok(docs.contains_key(name))
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        validate_name(name)?;
        let docs = self.docs.read().await;
        docs.get(name).cloned().ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        // No existence check — overwrites silently, like the filesystem
        // backend.
        self.write(name, content).await
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        validate_name(name)?;
        let mut docs = self.docs.write().await;
        docs.insert(name.to_owned(), content.to_vec());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        let mut docs = self.docs.write().await;
        docs.remove(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })?;
        Ok(())
    }
}
