/// Internal failures of a result store backend.
///
/// These never escape a [`ResultStore`](crate::ResultStore) call directly;
/// they are rendered into the message of an
/// [`Outcome::Error`](crate::Outcome::Error).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A previous holder of the map lock panicked.
    #[error("storage lock poisoned")]
    LockPoisoned,

    /// No unused identifier could be generated.
    #[error("failed to allocate a unique object id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    /// The generator produced the empty id.
    #[error("id generator produced an empty id")]
    EmptyId,
}

/// Result alias for store internals.
pub type StoreResult<T> = Result<T, StoreError>;
