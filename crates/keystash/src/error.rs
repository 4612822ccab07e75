use thiserror::Error;

/// An error produced by a raw storage backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend cannot service the call at all, e.g. storage is disabled
    /// or an internal lock was poisoned by a panicking writer.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// An internal database error from the durable backend.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Errors that can occur when working with entry accessors.
#[derive(Debug, Error)]
pub enum StashError {
    /// No raw text exists at the key. The value was either never written or
    /// has been removed since.
    #[error("no data found for key `{0}`: the value was never set or has been removed")]
    NotFound(String),

    /// Raw text exists at the key but does not parse as JSON compatible with
    /// the expected type. Never coalesced into [`StashError::NotFound`].
    #[error("stored data for key `{key}` is malformed")]
    Malformed {
        /// The key whose stored text failed to parse.
        key: String,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be encoded as JSON, e.g. a map with non-string
    /// keys.
    #[error("failed to serialize value for key `{key}`")]
    Serialize {
        /// The key the value was meant to be stored under.
        key: String,
        /// The underlying encode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A backend operation failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
