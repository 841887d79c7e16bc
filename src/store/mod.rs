//! Store Module
//!
//! Defines the backend contract every cache store implements, plus the
//! expiration sentinel shared by all of them.

mod entry;
pub mod memory;
pub mod redis;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;
pub use self::redis::{RedisConfig, RedisStore};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// == Expiry ==
/// Expiration policy for a single entry.
///
/// `Never` is the distinguished "lives forever" sentinel. A zero duration
/// passed to [`Expiry::from_duration`] normalizes to `Never`, never to
/// "already expired"; durations cannot be negative in Rust, so zero is the
/// only value that needs the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry never expires until explicitly deleted or flushed.
    Never,
    /// The entry expires once this duration has elapsed from insertion.
    After(Duration),
}

impl Expiry {
    /// Normalizes a caller-supplied duration: zero means forever.
    pub fn from_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            Expiry::Never
        } else {
            Expiry::After(duration)
        }
    }

    /// Expiry after the given number of seconds; zero means forever.
    pub fn after_secs(secs: u64) -> Self {
        Self::from_duration(Duration::from_secs(secs))
    }

    /// Expiry after the given number of milliseconds; zero means forever.
    pub fn after_millis(millis: u64) -> Self {
        Self::from_duration(Duration::from_millis(millis))
    }

    /// Absolute deadline computed at the moment of this call, or `None`
    /// for entries that never expire.
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Expiry::Never => None,
            Expiry::After(duration) => Some(Instant::now() + *duration),
        }
    }
}

// == Store Contract ==
/// The capability set every cache backend implements.
///
/// Absence is never an error: `get` returns `Ok(None)` and `has` returns
/// `Ok(false)` for missing or expired keys alike. Error returns are
/// reserved for connectivity, timeout and backend-internal faults.
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend-specific setup, e.g. establishing and health-checking a
    /// network connection. Called exactly once before the store is handed
    /// out; failure makes the backend unusable.
    async fn init(&mut self) -> Result<()>;

    /// True iff the key is present and not expired.
    async fn has(&self, key: &str) -> Result<bool>;

    /// The stored value, or `None` when missing or expired.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Inserts or fully replaces the entry. The deadline is recomputed
    /// from the moment of this call; a prior entry for the same key is
    /// discarded entirely.
    async fn put(&self, key: &str, value: Value, expiry: Expiry) -> Result<()>;

    /// Removes the entry. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes all entries, atomically from any reader's point of view.
    async fn flush(&self) -> Result<()>;

    /// Physically reclaims expired entries, returning how many were
    /// removed. Purely a memory-reclamation aid: `has`/`get` observe
    /// expiration lazily and never rely on a sweep having run. Backends
    /// whose service enforces its own expiration keep this no-op.
    async fn flush_expired(&self) -> Result<usize> {
        Ok(0)
    }
}
