use crate::errors::StoreError;
use crate::key::Key;
use std::collections::BTreeMap;

pub mod memory;
pub mod sqlite;

/// Contract every coffer storage backend must provide.
///
/// All operations are synchronous; blocking happens inside the backend. The
/// only consistency promise is that a call observes writes completed before
/// it returned. Faults surface as a single opaque [`StoreError`].
pub trait KvStore: Send + Sync {
    /// Fetch the value stored at `key`, or `None` when the key is absent.
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError>;

    /// Idempotent upsert of `value` at `key`.
    fn set(&self, key: &Key, value: &str) -> Result<(), StoreError>;

    /// Return every key whose path begins with `prefix`, with its value.
    ///
    /// Returns `None` (not an empty map) when nothing under the store starts
    /// with `prefix`; callers rely on the distinction to tell an empty
    /// container apart from a nonexistent one.
    fn list(&self, prefix: &str) -> Result<Option<BTreeMap<String, String>>, StoreError>;
}

impl<T> KvStore for Box<T>
where
    T: KvStore + ?Sized,
{
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
    fn list(&self, prefix: &str) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        (**self).list(prefix)
    }
}

impl<T> KvStore for std::sync::Arc<T>
where
    T: KvStore + ?Sized,
{
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
    fn list(&self, prefix: &str) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        (**self).list(prefix)
    }
}
