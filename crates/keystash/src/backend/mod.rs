//! Raw key/value storage backends.
//!
//! A [`Backend`] stores opaque text under string keys. The entry accessors in
//! [`crate::entry`] handle JSON encoding on top of this boundary, so backends
//! never interpret the text they hold.

use crate::error::BackendError;

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// A raw key/value text store.
///
/// Two implementations ship with this crate: [`SqliteBackend`] (durable,
/// survives process restarts) and [`MemoryBackend`] (session-scoped, lives as
/// long as the process). Both uphold the same contract:
///
/// - at most one text value is associated with a key at a time; writes fully
///   overwrite,
/// - an absent key reads as `Ok(None)`, never as an error,
/// - removing an absent key is a no-op.
///
/// Every operation is a single synchronous call; implementations must not
/// block beyond the underlying storage access.
pub trait Backend: Send + Sync {
    /// Retrieves the raw text stored under `key`, or `None` if absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Stores `text` under `key`, overwriting any previous value.
    fn set_raw(&self, key: &str, text: &str) -> Result<(), BackendError>;

    /// Removes the value stored under `key`, if any.
    fn remove_raw(&self, key: &str) -> Result<(), BackendError>;
}
