//! Typed accessors for a single stored entry.

use std::{marker::PhantomData, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    backend::Backend,
    error::{BackendError, StashError},
    key::Key,
};

/// Checks whether any raw text is stored under `key`, independent of any
/// accessor instance.
pub fn exists(backend: &dyn Backend, key: &str) -> Result<bool, BackendError> {
    Ok(backend.get_raw(key)?.is_some())
}

/// An uninitialized accessor, bound to a key and a backend but not yet holding
/// an initial value.
///
/// Creating a builder has no side effect on the backend. The only way forward
/// is [`EntryBuilder::init`], which produces the initialized [`Entry`]; there
/// is no transition back.
pub struct EntryBuilder<T> {
    backend: Arc<dyn Backend>,
    key: String,
    _marker: PhantomData<T>,
}

impl<T> EntryBuilder<T> {
    /// Binds a new uninitialized accessor to `key` in `backend`.
    pub fn new(backend: Arc<dyn Backend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// Binds a new uninitialized accessor using a registered type-safe key.
    pub fn for_key(backend: Arc<dyn Backend>, key: Key<T>) -> Self {
        Self::new(backend, key.name)
    }

    /// Initializes the entry with `value`, guarded so it never overwrites.
    ///
    /// If no raw text exists at the key, `value` is serialized and written; if
    /// text already exists it is left untouched. Either way the serialized
    /// `value` is retained in the returned [`Entry`] as the reset target, so
    /// this call is idempotent with respect to backend state: initializing the
    /// same key twice with different values never clobbers the first write.
    pub fn init(self, value: &T) -> Result<Entry<T>, StashError>
    where
        T: Serialize,
    {
        let initial_json =
            serde_json::to_string(value).map_err(|source| StashError::Serialize {
                key: self.key.clone(),
                source,
            })?;

        if self.backend.get_raw(&self.key)?.is_none() {
            self.backend.set_raw(&self.key, &initial_json)?;
        }

        Ok(Entry {
            backend: self.backend,
            key: self.key,
            initial_json,
            _marker: PhantomData,
        })
    }
}

/// An initialized accessor for one entry in one backend.
///
/// Holds the key, the backend handle, and the serialized initial value
/// captured at [`init`](EntryBuilder::init) time. The accessor itself is
/// otherwise stateless; all durable state lives in the backend and is only
/// mutated through [`save`](Entry::save), [`reset`](Entry::reset) and
/// [`clear`](Entry::clear).
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use keystash::{EntryBuilder, MemoryBackend};
///
/// # fn main() -> Result<(), keystash::StashError> {
/// let backend = Arc::new(MemoryBackend::new());
///
/// let count = EntryBuilder::new(backend, "count").init(&1u32)?;
/// count.save(&2)?;
/// assert_eq!(count.load()?, 2);
///
/// count.reset()?;
/// assert_eq!(count.load()?, 1);
/// # Ok(())
/// # }
/// ```
pub struct Entry<T> {
    backend: Arc<dyn Backend>,
    key: String,
    initial_json: String,
    _marker: PhantomData<T>,
}

impl<T> Entry<T> {
    /// The key this accessor is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and deserializes the current value.
    ///
    /// # Errors
    ///
    /// - [`StashError::NotFound`] if no raw text exists at the key, e.g. after
    ///   [`clear`](Entry::clear) or an external removal.
    /// - [`StashError::Malformed`] if text exists but does not parse as `T`.
    pub fn load(&self) -> Result<T, StashError>
    where
        T: DeserializeOwned,
    {
        match self.backend.get_raw(&self.key)? {
            Some(text) => {
                serde_json::from_str(&text).map_err(|source| StashError::Malformed {
                    key: self.key.clone(),
                    source,
                })
            }
            None => Err(StashError::NotFound(self.key.clone())),
        }
    }

    /// Serializes `value` and unconditionally overwrites the stored entry.
    ///
    /// Does not touch the retained initial value; [`reset`](Entry::reset)
    /// still restores the init-time value afterwards.
    pub fn save(&self, value: &T) -> Result<(), StashError>
    where
        T: Serialize,
    {
        let text = serde_json::to_string(value).map_err(|source| StashError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set_raw(&self.key, &text)?;
        Ok(())
    }

    /// Overwrites the stored entry with the value captured at init time.
    pub fn reset(&self) -> Result<(), StashError> {
        self.backend.set_raw(&self.key, &self.initial_json)?;
        Ok(())
    }

    /// Removes the stored entry entirely.
    ///
    /// The accessor stays usable: a later [`save`](Entry::save) or
    /// [`reset`](Entry::reset) re-creates the entry, while
    /// [`load`](Entry::load) reports [`StashError::NotFound`] until then.
    pub fn clear(&self) -> Result<(), StashError> {
        self.backend.remove_raw(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::backend::MemoryBackend;

    fn backend() -> Arc<MemoryBackend> {
        Arc::new(MemoryBackend::new())
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        dark_mode: bool,
        zoom: f64,
    }

    #[test]
    fn init_writes_and_load_round_trips() {
        let backend = backend();
        let entry = EntryBuilder::new(backend, "foo").init(&"bar".to_string()).unwrap();
        assert_eq!(entry.load().unwrap(), "bar");
    }

    #[test]
    fn init_round_trips_every_json_shape() {
        let backend = backend();

        let s = EntryBuilder::new(backend.clone(), "s").init(&"hello".to_string()).unwrap();
        assert_eq!(s.load().unwrap(), "hello");

        let n = EntryBuilder::new(backend.clone(), "n").init(&123u32).unwrap();
        assert_eq!(n.load().unwrap(), 123);

        let b = EntryBuilder::new(backend.clone(), "b").init(&true).unwrap();
        assert!(b.load().unwrap());

        let v = EntryBuilder::new(backend.clone(), "v").init(&vec![1, 2, 3]).unwrap();
        assert_eq!(v.load().unwrap(), vec![1, 2, 3]);

        let o = EntryBuilder::new(backend, "o")
            .init(&Prefs {
                dark_mode: true,
                zoom: 1.25,
            })
            .unwrap();
        assert_eq!(
            o.load().unwrap(),
            Prefs {
                dark_mode: true,
                zoom: 1.25,
            }
        );
    }

    #[test]
    fn init_never_overwrites_an_existing_entry() {
        let backend = backend();

        let first = EntryBuilder::new(backend.clone(), "dup")
            .init(&"first".to_string())
            .unwrap();
        let second = EntryBuilder::new(backend, "dup")
            .init(&"second".to_string())
            .unwrap();

        assert_eq!(first.load().unwrap(), "first");
        assert_eq!(second.load().unwrap(), "first");
    }

    #[test]
    fn save_overwrites_unconditionally() {
        let backend = backend();
        let entry = EntryBuilder::new(backend, "count").init(&1u32).unwrap();

        entry.save(&2).unwrap();
        assert_eq!(entry.load().unwrap(), 2);

        entry.save(&3).unwrap();
        assert_eq!(entry.load().unwrap(), 3);
    }

    #[test]
    fn reset_restores_the_init_value_after_any_number_of_saves() {
        let backend = backend();
        let entry = EntryBuilder::new(backend, "count").init(&1u32).unwrap();

        for n in 2..10 {
            entry.save(&n).unwrap();
        }
        entry.reset().unwrap();
        assert_eq!(entry.load().unwrap(), 1);

        // reset is repeatable and unaffected by further saves
        entry.save(&42).unwrap();
        entry.reset().unwrap();
        assert_eq!(entry.load().unwrap(), 1);
    }

    #[test]
    fn reset_ignores_a_pre_existing_entry_value() {
        // init on an occupied key keeps the old stored value, but reset
        // restores the value handed to init, not the one found in storage.
        let backend = backend();
        EntryBuilder::new(backend.clone(), "k")
            .init(&"stored".to_string())
            .unwrap();

        let entry = EntryBuilder::new(backend, "k")
            .init(&"mine".to_string())
            .unwrap();
        assert_eq!(entry.load().unwrap(), "stored");

        entry.reset().unwrap();
        assert_eq!(entry.load().unwrap(), "mine");
    }

    #[test]
    fn clear_removes_the_entry_and_load_reports_not_found() {
        let backend = backend();
        let entry = EntryBuilder::new(backend, "obj")
            .init(&Prefs {
                dark_mode: false,
                zoom: 1.0,
            })
            .unwrap();

        entry.clear().unwrap();
        assert!(matches!(entry.load(), Err(StashError::NotFound(key)) if key == "obj"));

        // the accessor stays usable after clear
        entry.save(&Prefs {
            dark_mode: true,
            zoom: 2.0,
        })
        .unwrap();
        assert!(entry.load().unwrap().dark_mode);
    }

    #[test]
    fn external_removal_also_reports_not_found() {
        let backend = backend();
        let entry = EntryBuilder::new(backend.clone(), "k")
            .init(&"v".to_string())
            .unwrap();

        backend.remove_raw("k").unwrap();
        assert!(matches!(entry.load(), Err(StashError::NotFound(_))));
    }

    #[test]
    fn malformed_text_is_not_coalesced_with_not_found() {
        let backend = backend();
        let entry = EntryBuilder::new(backend.clone(), "k").init(&1u32).unwrap();

        backend.set_raw("k", "not json").unwrap();
        assert!(matches!(entry.load(), Err(StashError::Malformed { .. })));
    }

    #[test]
    fn exists_tracks_the_entry_lifecycle() {
        let backend = backend();
        assert!(!exists(backend.as_ref(), "k").unwrap());

        let entry = EntryBuilder::new(backend.clone(), "k")
            .init(&"v".to_string())
            .unwrap();
        assert!(exists(backend.as_ref(), "k").unwrap());

        entry.clear().unwrap();
        assert!(!exists(backend.as_ref(), "k").unwrap());

        entry.save(&"w".to_string()).unwrap();
        assert!(exists(backend.as_ref(), "k").unwrap());
    }

    #[test]
    fn typed_keys_bind_the_value_type() {
        crate::register_key!(const ZOOM: f64 = "zoom");

        let backend = backend();
        let entry = EntryBuilder::for_key(backend, ZOOM).init(&1.5).unwrap();
        assert_eq!(entry.key(), "zoom");
        assert_eq!(entry.load().unwrap(), 1.5);
    }
}
