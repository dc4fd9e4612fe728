use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{StorageBackend, StoreError};

/// Process-local backend. Survives nothing beyond the process; used when no
/// durable location is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            items.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
