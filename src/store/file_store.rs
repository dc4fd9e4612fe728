use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::{StorageBackend, StoreError};

type Entries = BTreeMap<String, String>;

/// Durable backend keeping every key in one flat JSON object on disk.
///
/// Each mutation rewrites the file through a sibling temp file and a rename,
/// so a batch written with `set_items` becomes visible as a whole or not at all.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<Entries, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = entries.len(), "persistent store flushed");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt file is replaced on the next write rather than wedging
        // every later write.
        let mut entries = match self.read() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "discarding corrupt persistent store"
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut entries);
        self.write(&entries)
    }
}

impl StorageBackend for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StoreError> {
        self.update(|entries| {
            for (key, value) in items {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StoreError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}
