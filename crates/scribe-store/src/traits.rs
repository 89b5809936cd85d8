use scribe_types::ObjectId;

use crate::outcome::Outcome;

/// Keyed, append-only container for analysis results.
///
/// All implementations must satisfy these invariants:
/// - `store` generates the key itself; callers never supply one.
/// - A returned key is never already present, so `store` never overwrites.
/// - `load` returns exactly the object stored under the key.
/// - Both operations are safe to call concurrently from any number of tasks.
/// - Internal failures are reported as [`Outcome::Error`], never by panicking.
pub trait ResultStore<T>: Send + Sync {
    /// Insert `obj` under a freshly generated id.
    ///
    /// Returns `Success` with the new id and no data, or `Error` with the
    /// empty id. A failed insertion leaves the store unchanged.
    fn store(&self, obj: T) -> Outcome<T>;

    /// Look up the object stored under `id`.
    ///
    /// Returns `NotFound` for any id this store never produced.
    fn load(&self, id: &ObjectId) -> Outcome<T>;
}
