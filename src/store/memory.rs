//! In-Memory Store Module
//!
//! Concurrent key-to-entry index with lazy expiration and an active sweep.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::StoreOptions;
use crate::error::{CacheError, Result};
use crate::store::{Entry, Expiry, Store};

// == Memory Store ==
/// In-process TTL store backed by a hash index.
///
/// Reads take the shared lock and evaluate expiration lazily: an expired
/// entry is reported absent immediately, but it is only physically
/// removed by [`Store::flush_expired`]. Readers of different keys never
/// block each other; structural mutation serializes on the write lock, so
/// a flush is a single atomic transition from every reader's view.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry constructor. The memory backend has no tunables, so any
    /// option at all is a configuration mistake.
    pub fn construct(options: &StoreOptions) -> Result<Box<dyn Store>> {
        if let Some(option) = options.first_set() {
            return Err(CacheError::Config(format!(
                "option `{option}` is not supported by the memory backend"
            )));
        }
        Ok(Box::new(Self::new()))
    }

    /// Current number of physical entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the index holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn init(&mut self) -> Result<()> {
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).is_some_and(|entry| !entry.is_expired()))
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: Value, expiry: Expiry) -> Result<()> {
        let entry = Entry::new(value, expiry);
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }

    async fn flush_expired(&self) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let removed = before - entries.len();
        if removed > 0 {
            debug!("swept {} expired entries", removed);
        }
        Ok(removed)
    }
}
