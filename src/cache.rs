//! Cache Facade Module
//!
//! Backend-agnostic compound operations composed purely from the store
//! contract. The facade holds no entries of its own and never inspects
//! backend internals.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::store::{Expiry, Store};

// == Cache ==
/// Caller-facing cache over a single backend.
///
/// The backend is selected once at construction (see
/// [`Registry::open`](crate::registry::Registry::open)) and cannot be
/// swapped afterwards. Cloning is cheap and yields a handle to the same
/// backend.
///
/// Store errors propagate unchanged: a failed read is surfaced as an
/// error, never silently treated as a miss. Absence is `Ok(None)`.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn Store>,
}

impl Cache {
    /// Wraps an already-initialized store.
    pub(crate) fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // == Pass-through Operations ==
    /// True iff the key is present and not expired.
    pub async fn has(&self, key: &str) -> Result<bool> {
        self.store.has(key).await
    }

    /// The stored value, or `None` when missing or expired.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.store.get(key).await
    }

    /// Inserts or fully replaces the entry with the given expiry.
    pub async fn put(&self, key: &str, value: Value, expiry: Expiry) -> Result<()> {
        self.store.put(key, value, expiry).await
    }

    /// Stores the value with no expiration.
    pub async fn forever(&self, key: &str, value: Value) -> Result<()> {
        self.put(key, value, Expiry::Never).await
    }

    /// Removes the entry for the key; removing an absent key succeeds.
    pub async fn forget(&self, key: &str) -> Result<()> {
        self.store.delete(key).await
    }

    /// Removes every entry.
    pub async fn flush(&self) -> Result<()> {
        self.store.flush().await
    }

    /// Reclaims expired entries from backends that sweep, returning how
    /// many were removed. No-op (0) where the backend enforces its own
    /// expiration.
    pub async fn flush_expired(&self) -> Result<usize> {
        self.store.flush_expired().await
    }

    // == Compound Operations ==
    /// Returns the stored value, or the computed default **without
    /// storing it**. Presence is decided by the store's absent signal
    /// alone, so a stored `null` still counts as present.
    pub async fn get_or_default<F>(&self, key: &str, default_fn: F) -> Result<Value>
    where
        F: FnOnce() -> Value,
    {
        match self.get(key).await? {
            Some(value) => Ok(value),
            None => Ok(default_fn()),
        }
    }

    /// Returns the stored value; on a miss, computes one, stores it with
    /// the given expiry and returns it.
    ///
    /// Not exactly-once: two concurrent callers can both observe the miss
    /// and both compute and store. The last `put` wins.
    pub async fn remember<F>(&self, key: &str, expiry: Expiry, compute: F) -> Result<Value>
    where
        F: FnOnce() -> Value,
    {
        if let Some(value) = self.get(key).await? {
            return Ok(value);
        }

        let value = compute();
        self.put(key, value.clone(), expiry).await?;
        Ok(value)
    }

    /// [`Cache::remember`] with no expiration.
    pub async fn remember_forever<F>(&self, key: &str, compute: F) -> Result<Value>
    where
        F: FnOnce() -> Value,
    {
        self.remember(key, Expiry::Never, compute).await
    }

    /// Reads the value, then removes the key. An absent key returns
    /// `Ok(None)` without erroring.
    pub async fn pull(&self, key: &str) -> Result<Option<Value>> {
        let value = self.get(key).await?;
        self.forget(key).await?;
        Ok(value)
    }

    /// [`Cache::get_or_default`] followed by removal. The delete is
    /// issued even when the default was computed (and thus never stored),
    /// so side effects match the present case.
    pub async fn pull_or_default<F>(&self, key: &str, default_fn: F) -> Result<Value>
    where
        F: FnOnce() -> Value,
    {
        let value = self.get_or_default(key, default_fn).await?;
        self.forget(key).await?;
        Ok(value)
    }

    /// Stores the value only when the key is currently absent, returning
    /// whether it stored. Check-then-act: not atomic across the store
    /// boundary, so a concurrent writer can win the race.
    pub async fn add(&self, key: &str, value: Value, expiry: Expiry) -> Result<bool> {
        if self.has(key).await? {
            return Ok(false);
        }

        self.put(key, value, expiry).await?;
        Ok(true)
    }
}
