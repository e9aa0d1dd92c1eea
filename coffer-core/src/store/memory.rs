use crate::errors::StoreError;
use crate::key::Key;
use crate::store::KvStore;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory store used for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key.as_str()).cloned())
    }

    fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        self.entries()?
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        let entries = self.entries()?;
        let matches: BTreeMap<String, String> = entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches))
        }
    }
}
