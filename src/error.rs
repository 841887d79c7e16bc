//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.
//!
//! Absence is never modeled as an error: a missing or expired key is a
//! successful call returning no value. The variants here cover
//! configuration mistakes, connectivity failures and backend faults.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No backend is registered under the requested name
    #[error("cache backend `{0}` is not registered")]
    UnknownBackend(String),

    /// A backend is already registered under this name
    #[error("cache backend `{0}` is already registered")]
    AlreadyRegistered(String),

    /// Invalid or mismatched construction options
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Backend could not be initialized
    #[error("connection failed: {0}")]
    Connection(String),

    /// A single operation exceeded its configured timeout
    #[error("operation `{0}` timed out")]
    Timeout(&'static str),

    /// Backend-internal operational failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Stored payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
