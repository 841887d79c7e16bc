//! Backend Registry Module
//!
//! Maps backend names to constructors and drives cache construction:
//! look up, build with options, initialize, wrap. No partial cache is
//! ever returned.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::Cache;
use crate::config::StoreOptions;
use crate::error::{CacheError, Result};
use crate::store::{MemoryStore, RedisStore, Store};

// == Backend Names ==
/// Name of the built-in in-memory backend.
pub const MEMORY_BACKEND: &str = "memory";

/// Name of the built-in Redis backend.
pub const REDIS_BACKEND: &str = "redis";

/// Constructor for a backend: validates the options and builds the
/// store. Initialization happens separately via [`Store::init`].
pub type StoreConstructor = fn(&StoreOptions) -> Result<Box<dyn Store>>;

// == Registry ==
/// Registry of named backend constructors.
///
/// An explicit object rather than process-global state: own one per
/// process (or per test), register any additional backends during
/// startup, then open caches from it. Registration is append-only; a
/// name can never be overwritten or removed.
pub struct Registry {
    constructors: RwLock<HashMap<String, StoreConstructor>>,
}

impl Registry {
    // == Constructors ==
    /// A registry seeded with the built-in `memory` and `redis` backends.
    pub fn new() -> Self {
        let mut constructors: HashMap<String, StoreConstructor> = HashMap::new();
        constructors.insert(MEMORY_BACKEND.to_string(), MemoryStore::construct);
        constructors.insert(REDIS_BACKEND.to_string(), RedisStore::construct);
        Self {
            constructors: RwLock::new(constructors),
        }
    }

    /// An empty registry with no backends at all.
    pub fn empty() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    // == Registration ==
    /// Adds a backend under a new name. Registering a name that already
    /// exists is an error; existing registrations are never replaced.
    pub fn register(&self, name: &str, constructor: StoreConstructor) -> Result<()> {
        let mut constructors = self.constructors.write();
        if constructors.contains_key(name) {
            return Err(CacheError::AlreadyRegistered(name.to_string()));
        }
        constructors.insert(name.to_string(), constructor);
        Ok(())
    }

    /// True iff a backend is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    // == Construction ==
    /// Builds, initializes and wraps the named backend.
    ///
    /// Fails on an unknown name, on any rejected option, or on a failed
    /// [`Store::init`] (e.g. an unreachable remote service); every
    /// failure path aborts construction with nothing leaked.
    pub async fn open(&self, name: &str, options: StoreOptions) -> Result<Cache> {
        let constructor = {
            let constructors = self.constructors.read();
            *constructors
                .get(name)
                .ok_or_else(|| CacheError::UnknownBackend(name.to_string()))?
        };

        let mut store = constructor(&options)?;
        store.init().await?;
        debug!("opened cache backend `{}`", name);

        Ok(Cache::new(Arc::from(store)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
