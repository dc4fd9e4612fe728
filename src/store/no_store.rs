use super::{StorageBackend, StoreError};

/// A backend that refuses every operation, standing in for a user agent
/// without durable storage (private browsing, storage quota of zero).
pub struct NoStore;

impl NoStore {
    pub fn new() -> Self {
        NoStore
    }
}

impl Default for NoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for NoStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
