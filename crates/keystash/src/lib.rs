#![doc = include_str!("../README.md")]

/// This module provides the raw key/value backends and the trait they share.
pub mod backend;

/// Typed accessors for a single stored entry.
pub mod entry;

/// Error types for backend and accessor operations.
pub mod error;

mod key;
mod stash;

pub use backend::{Backend, MemoryBackend, SqliteBackend};
pub use entry::{Entry, EntryBuilder, exists};
pub use error::{BackendError, StashError};
pub use key::Key;
pub use stash::{Scope, Stash};
