//! The durable/session backend pair behind one facade.

use std::{path::Path, sync::Arc};

use crate::{
    backend::{Backend, MemoryBackend, SqliteBackend},
    entry::{self, EntryBuilder},
    error::BackendError,
    key::Key,
};

/// Selects which of a stash's two backends an entry lives in.
///
/// Chosen once when the accessor is created and immutable afterwards. The two
/// scopes are fully isolated: a write under some key in one scope is never
/// observable through the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The durable backend; data survives process restarts.
    Durable,
    /// The session-scoped backend; data lives as long as the process.
    Session,
}

/// A pair of storage backends, one durable and one session-scoped, handing
/// out typed entry accessors.
///
/// The stash does not own the stored data's lifecycle beyond holding the
/// backend handles; accessors created from it keep their backend alive on
/// their own.
///
/// # Example
/// ```rust,no_run
/// use keystash::{Scope, Stash};
///
/// # fn main() -> Result<(), keystash::StashError> {
/// let stash = Stash::open("app-state.sqlite")?;
///
/// let theme = stash.entry("theme", Scope::Durable).init(&"light".to_string())?;
/// theme.save(&"dark".to_string())?;
///
/// // Session entries vanish when the process exits.
/// let draft = stash.entry("draft", Scope::Session).init(&String::new())?;
/// # let _ = draft;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Stash {
    durable: Arc<dyn Backend>,
    session: Arc<dyn Backend>,
}

impl std::fmt::Debug for Stash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stash").finish()
    }
}

impl Stash {
    /// Builds a stash from two externally-provided backends.
    pub fn new(durable: Arc<dyn Backend>, session: Arc<dyn Backend>) -> Self {
        Self { durable, session }
    }

    /// Opens the default production pairing: a SQLite database at `path` for
    /// the durable scope and a fresh in-memory store for the session scope.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        Ok(Self::new(
            Arc::new(SqliteBackend::open(path)?),
            Arc::new(MemoryBackend::new()),
        ))
    }

    /// Builds a stash backed entirely by process memory, for tests and
    /// headless use.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), Arc::new(MemoryBackend::new()))
    }

    /// The backend handle for `scope`.
    pub fn backend(&self, scope: Scope) -> Arc<dyn Backend> {
        match scope {
            Scope::Durable => self.durable.clone(),
            Scope::Session => self.session.clone(),
        }
    }

    /// Creates an uninitialized accessor for `key` in the chosen scope.
    pub fn entry<T>(&self, key: impl Into<String>, scope: Scope) -> EntryBuilder<T> {
        EntryBuilder::new(self.backend(scope), key)
    }

    /// Creates an uninitialized accessor from a registered type-safe key.
    pub fn entry_for<T>(&self, key: Key<T>, scope: Scope) -> EntryBuilder<T> {
        EntryBuilder::for_key(self.backend(scope), key)
    }

    /// Checks whether any raw text is stored under `key` in the chosen scope.
    pub fn exists(&self, key: &str, scope: Scope) -> Result<bool, BackendError> {
        entry::exists(self.backend(scope).as_ref(), key)
    }
}
