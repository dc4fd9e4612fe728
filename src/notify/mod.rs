//! User-facing toast notifications.

mod toast;

pub use toast::{Notifier, RecordingNotifier, Toast, ToastLevel, TracingNotifier};
