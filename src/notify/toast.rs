use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{error, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Errors stay on screen long enough to copy a request id.
const ERROR_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One already-localized notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub body: String,
    pub footer: Option<String>,
    pub timeout: Duration,
}

impl Toast {
    pub fn new(level: ToastLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        let timeout = match level {
            ToastLevel::Error => ERROR_TIMEOUT,
            _ => DEFAULT_TIMEOUT,
        };
        Self {
            level,
            title: title.into(),
            body: body.into(),
            footer: None,
            timeout,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, title, body)
    }

    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }
}

/// Displays toasts. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log; the headless default.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        let footer = toast.footer.as_deref().unwrap_or_default();
        match toast.level {
            ToastLevel::Error => error!(title = %toast.title, footer, "{}", toast.body),
            ToastLevel::Warning => warn!(title = %toast.title, footer, "{}", toast.body),
            ToastLevel::Info | ToastLevel::Success => {
                info!(title = %toast.title, footer, "{}", toast.body)
            }
        }
    }
}

/// Queues toasts for a UI layer to drain.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copy of the queue without consuming it.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
