//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Instant;

use serde_json::Value;

use crate::store::Expiry;

// == Cache Entry ==
/// A stored value plus its expiration marker.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: Value,
    /// Absolute expiration deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates an entry, computing the absolute deadline at the moment of
    /// the call.
    pub fn new(value: Value, expiry: Expiry) -> Self {
        Self {
            value,
            expires_at: expiry.deadline(),
        }
    }

    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its deadline, so the instant the TTL has
    /// fully elapsed the entry reads as absent.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}
