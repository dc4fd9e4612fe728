use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: u64,
}

/// Rate-limits repetitive log lines per key.
///
/// The first event for a key is always emitted. Later events inside the
/// window are counted, and the count is handed back with the next event
/// that opens a fresh window.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<&'static str, Window>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `Some(suppressed_count)` when the event for `key` should be logged.
    pub fn should_emit(&self, key: &'static str) -> Option<u64> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        match windows.get_mut(key) {
            Some(window) if now.duration_since(window.opened_at) >= self.interval => {
                let suppressed = window.suppressed;
                window.opened_at = now;
                window.suppressed = 0;
                Some(suppressed)
            }
            Some(window) => {
                window.suppressed += 1;
                None
            }
            None => {
                windows.insert(
                    key,
                    Window {
                        opened_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}
