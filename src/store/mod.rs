pub mod base;
pub mod file_store;
pub mod local_storage;
pub mod memory_store;
pub mod no_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{LocalStorage, create_backend};"
pub use base::{create_backend, StorageBackend, StoreError};
pub use local_storage::LocalStorage;
