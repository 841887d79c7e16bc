//! Background Tasks Module
//!
//! Periodic maintenance work that runs alongside the cache.

mod sweep;

pub use sweep::spawn_sweep_task;
