//! kvcache - A pluggable caching facade
//!
//! Provides a uniform [`Cache`] over swappable backends: an in-process
//! TTL-indexed store and a Redis-backed remote store, with a registry
//! for adding more.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod tasks;

pub use cache::Cache;
pub use config::StoreOptions;
pub use error::{CacheError, Result};
pub use registry::{Registry, MEMORY_BACKEND, REDIS_BACKEND};
pub use store::{Expiry, Store};
pub use tasks::spawn_sweep_task;
