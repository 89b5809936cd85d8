//! Keyed result store for Scribe.
//!
//! Every analysis Scribe produces is inserted into a [`ResultStore`] under an
//! identifier the store generates itself, and read back later by that
//! identifier. The store is append-only: there is no update or delete.
//!
//! # Storage Backends
//!
//! All backends implement the [`ResultStore`] trait:
//!
//! - [`InMemoryResultStore`] -- `RwLock<HashMap>` store, process-lifetime scoped
//!
//! # Design Rules
//!
//! 1. Keys are only ever produced by the store's own generator.
//! 2. `store` always creates a new key and never overwrites an existing one.
//! 3. `load` never mutates state.
//! 4. Both operations report through an [`Outcome`] and never panic on
//!    internal failure.
//! 5. The store never interprets payloads.

pub mod error;
pub mod memory;
pub mod outcome;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryResultStore;
pub use outcome::{Outcome, OutcomeStatus};
pub use traits::ResultStore;
