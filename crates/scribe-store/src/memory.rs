use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use scribe_types::ObjectId;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::outcome::Outcome;
use crate::traits::ResultStore;

/// How many fresh ids `store` draws before giving up on a collision streak.
pub const MAX_ID_ATTEMPTS: usize = 8;

type IdSource = Box<dyn Fn() -> ObjectId + Send + Sync>;

/// In-memory, HashMap-based result store.
///
/// Created once at process start and dropped at shutdown; nothing is
/// persisted or evicted. All entries live behind a `RwLock` so any number of
/// in-flight requests can insert and read concurrently. Objects are cloned
/// on read.
pub struct InMemoryResultStore<T> {
    objects: RwLock<HashMap<ObjectId, T>>,
    id_source: IdSource,
}

impl<T> InMemoryResultStore<T> {
    /// Create a new empty store that mints random UUID v4 ids.
    pub fn new() -> Self {
        Self::with_id_source(ObjectId::generate)
    }

    /// Create a store with a custom id generator.
    ///
    /// Collisions with existing keys are still detected and retried, so a
    /// weak generator degrades into `Error` outcomes, never overwrites.
    pub fn with_id_source(source: impl Fn() -> ObjectId + Send + Sync + 'static) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            id_source: Box::new(source),
        }
    }

    /// Number of objects currently stored.
    ///
    /// A poisoned lock also reads as 0 (and is logged), so 0 does not prove
    /// the store is empty; `load` reports poisoning as an `Error` outcome.
    pub fn len(&self) -> usize {
        match self.objects.read() {
            Ok(map) => map.len(),
            Err(_) => {
                warn!("storage lock poisoned; reporting 0 objects");
                0
            }
        }
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, obj: T) -> StoreResult<ObjectId> {
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned)?;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.id_source)();
            if id.is_empty() {
                return Err(StoreError::EmptyId);
            }
            match map.entry(id) {
                Entry::Occupied(occupied) => {
                    warn!(id = %occupied.key(), "generated id already in use; retrying");
                }
                Entry::Vacant(vacant) => {
                    let id = vacant.key().clone();
                    vacant.insert(obj);
                    return Ok(id);
                }
            }
        }
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl<T> Default for InMemoryResultStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultStore<T> for InMemoryResultStore<T>
where
    T: Clone + Send + Sync,
{
    fn store(&self, obj: T) -> Outcome<T> {
        match self.insert(obj) {
            Ok(id) => {
                debug!(id = %id, "stored object");
                Outcome::stored(id)
            }
            Err(e) => {
                warn!(error = %e, "store failed");
                Outcome::error(ObjectId::empty(), &e)
            }
        }
    }

    fn load(&self, id: &ObjectId) -> Outcome<T> {
        let map = match self.objects.read() {
            Ok(map) => map,
            Err(_) => return Outcome::error(id.clone(), &StoreError::LockPoisoned),
        };
        match map.get(id) {
            Some(obj) => Outcome::found(id.clone(), obj.clone()),
            None => Outcome::not_found(id.clone()),
        }
    }
}

impl<T> std::fmt::Debug for InMemoryResultStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryResultStore")
            .field("object_count", &self.len())
            .finish()
    }
}
