//! Type-safe keys for entry storage.

use std::marker::PhantomData;

/// Register a type-safe entry key.
///
/// Associates a string key name with a value type at compile time, so an
/// accessor created from the key can only hold values of that type.
///
/// # Example
/// ```rust
/// use keystash::register_key;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct WindowLayout {
///     width: u32,
///     height: u32,
/// }
///
/// register_key!(pub const LAYOUT: WindowLayout = "window_layout");
/// ```
#[macro_export]
macro_rules! register_key {
    ($vis:vis const $name:ident: $ty:ty = $key:literal) => {
        $vis const $name: $crate::Key<$ty> = $crate::Key::new($key);
    };
}

/// Type-safe key for entry storage.
///
/// Pairs a string key name with a value type at compile time, preventing type
/// mismatches while keeping the backend contract untyped. The stored text
/// carries no type tag; the `Key` is the only place the expected shape is
/// recorded.
///
/// Use the [`register_key!`](crate::register_key) macro to create keys.
#[derive(Debug, Clone, Copy)]
pub struct Key<T> {
    pub(crate) name: &'static str,
    _marker: PhantomData<T>,
}

impl<T> Key<T> {
    /// Create a new type-safe key with the given storage name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The string name this key stores under.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    register_key!(const COUNTER: u32 = "counter");

    #[test]
    fn key_carries_its_storage_name() {
        assert_eq!(COUNTER.name(), "counter");
    }
}
