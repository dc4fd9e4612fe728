use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::{debug, warn};

use super::StorageBackend;
use crate::utils::LogThrottle;

const PROBE_KEY: &str = "__storage_test__";
const UNAVAILABLE_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Degrade-gracefully adapter over a [`StorageBackend`].
///
/// Availability is probed once, on first use, with a write/delete round-trip
/// and cached for the adapter's lifetime; a backend that becomes available
/// later is only noticed by a new adapter. While unavailable, reads return
/// their default and writes are dropped.
#[derive(Clone)]
pub struct LocalStorage {
    backend: Arc<dyn StorageBackend>,
    available: Arc<OnceLock<bool>>,
    throttle: Arc<LogThrottle>,
}

impl LocalStorage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            available: Arc::new(OnceLock::new()),
            throttle: Arc::new(LogThrottle::new(UNAVAILABLE_LOG_WINDOW)),
        }
    }

    /// Whether the backend accepted the probe round-trip.
    pub fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let ok = self
                .backend
                .set_item(PROBE_KEY, PROBE_KEY)
                .and_then(|_| self.backend.remove_item(PROBE_KEY))
                .is_ok();
            debug!(available = ok, "persistent store probed");
            ok
        })
    }

    /// Read `key`, returning `None` when missing, empty, or unavailable.
    pub fn get(&self, key: &str) -> Option<String> {
        if !self.usable("store.get") {
            return None;
        }
        match self.backend.get_item(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!(key, error = %e, "persistent store read failed");
                None
            }
        }
    }

    /// Read `key`, falling back to `default`.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set(&self, key: &str, value: &str) {
        if !self.usable("store.set") {
            return;
        }
        if let Err(e) = self.backend.set_item(key, value) {
            warn!(key, error = %e, "persistent store write failed");
        }
    }

    /// Write a group of entries as one backend batch.
    pub fn set_many(&self, items: &[(&str, &str)]) {
        if !self.usable("store.set") {
            return;
        }
        if let Err(e) = self.backend.set_items(items) {
            warn!(entries = items.len(), error = %e, "persistent store batch write failed");
        }
    }

    pub fn remove(&self, key: &str) {
        self.remove_many(&[key]);
    }

    pub fn remove_many(&self, keys: &[&str]) {
        if !self.usable("store.remove") {
            return;
        }
        if let Err(e) = self.backend.remove_items(keys) {
            warn!(keys = ?keys, error = %e, "persistent store removal failed");
        }
    }

    fn usable(&self, operation: &'static str) -> bool {
        if self.is_available() {
            return true;
        }
        if let Some(suppressed_count) = self.throttle.should_emit(operation) {
            debug!(
                event_name = "store.unavailable.noop",
                event_domain = "store",
                operation,
                suppressed_count,
                "persistent store unavailable; operation skipped"
            );
        }
        false
    }
}
