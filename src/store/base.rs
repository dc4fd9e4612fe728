use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore, no_store::NoStore};
use crate::config::{StoreBackend, StoreConfig};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistent store is unavailable")]
    Unavailable,
    #[error("persistent store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("persistent store contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A durable string key-value store, the native stand-in for the browser's
/// `localStorage`.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// Write several entries. Backends that can commit them as one unit
    /// should override this.
    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Remove several entries.
    fn remove_items(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// Creates the backend described by the StoreConfig.
/// A disabled store yields NoStore, which the adapter detects as unavailable.
pub fn create_backend(config: &StoreConfig) -> Arc<dyn StorageBackend> {
    if !config.enabled {
        info!("Persistent store is disabled. Using NoStore.");
        return Arc::new(NoStore::new());
    }

    match &config.backend {
        Some(StoreBackend::File(file_config)) => {
            info!(path = %file_config.path.display(), "Using file-backed persistent store.");
            Arc::new(FileStore::new(&file_config.path))
        }
        Some(StoreBackend::Memory) | None => {
            info!("Using in-memory persistent store.");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileStoreConfig;

    #[test]
    fn disabled_config_yields_unavailable_backend() {
        let backend = create_backend(&StoreConfig {
            enabled: false,
            backend: Some(StoreBackend::Memory),
        });
        assert!(matches!(
            backend.set_item("k", "v"),
            Err(StoreError::Unavailable)
        ));
    }

    #[test]
    fn file_config_yields_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let backend = create_backend(&StoreConfig {
            enabled: true,
            backend: Some(StoreBackend::File(FileStoreConfig { path: path.clone() })),
        });

        backend.set_item("k", "v").unwrap();
        assert!(path.exists());
    }
}
