//! Configuration Module
//!
//! Typed construction options applied uniformly across backends.

use std::time::Duration;

/// Backend construction options.
///
/// A typed bag rather than free-form functional options: every field is
/// validated by the backend that consumes it, and a backend fails
/// construction when handed an option it does not understand. The memory
/// backend accepts none of these; they all target remote backends.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub(crate) address: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) database: Option<i64>,
    pub(crate) max_retries: Option<u32>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) write_timeout: Option<Duration>,
}

impl StoreOptions {
    /// Creates an empty option set; backends fall back to their defaults
    /// for anything left unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend address as a `host:port` string.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the authentication credential.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Selects the logical database or namespace index.
    pub fn database(mut self, database: i64) -> Self {
        self.database = Some(database);
        self
    }

    /// Sets the maximum number of connection attempts.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Bounds every read-side operation.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Bounds every write-side operation.
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Name of the first option that has been set, for backends that
    /// accept none.
    pub(crate) fn first_set(&self) -> Option<&'static str> {
        if self.address.is_some() {
            return Some("address");
        }
        if self.password.is_some() {
            return Some("password");
        }
        if self.database.is_some() {
            return Some("database");
        }
        if self.max_retries.is_some() {
            return Some("max_retries");
        }
        if self.read_timeout.is_some() {
            return Some("read_timeout");
        }
        if self.write_timeout.is_some() {
            return Some("write_timeout");
        }
        None
    }
}
