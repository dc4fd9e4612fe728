use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::error_map::{describe, lookup};
use super::failure::RequestFailure;
use super::kind::{AppError, MISSING_TOKEN, NET_ERR, UNKNOWN_ERROR};
use crate::i18n::Translator;
use crate::notify::{Notifier, Toast};

/// Turns failures into localized error toasts.
///
/// The handler never raises: it reports and hands the classified error back
/// so the caller can finish its own cleanup.
#[derive(Clone)]
pub struct ErrorHandler {
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
}

impl ErrorHandler {
    pub fn new(notifier: Arc<dyn Notifier>, translator: Arc<dyn Translator>) -> Self {
        Self {
            notifier,
            translator,
        }
    }

    /// Classify `failure`, notify the user, and return the error.
    pub fn handle(&self, failure: RequestFailure) -> AppError {
        debug!(failure = %failure, "handling request failure");
        let error = AppError::classify(failure);
        self.report(&error);
        error
    }

    /// Emit the toast(s) for an already classified error.
    pub fn report(&self, error: &AppError) {
        warn!(
            event_name = "client.error",
            event_domain = "errors",
            code = error.code(),
            "{error}"
        );
        match error {
            AppError::NetworkUnreachable => self.show_error(NET_ERR, None, None),
            AppError::MissingToken => self.show_error(MISSING_TOKEN, None, None),
            AppError::Unauthorized {
                code,
                message,
                request_id,
            }
            | AppError::BackendRejected {
                code,
                message,
                request_id,
            } => self.show_error(code, message.as_deref(), request_id.as_deref()),
            AppError::ValidationFailed { fields, request_id } => {
                for field in fields {
                    self.show_error(&field.code, None, request_id.as_deref());
                }
            }
            AppError::UnknownBackendResponse { body, request_id } => {
                // An empty answer has nothing worth showing; fall back to
                // the generic message.
                let raw = match body {
                    Value::Null => None,
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
                self.show_error(UNKNOWN_ERROR, raw.as_deref(), request_id.as_deref())
            }
        }
    }

    /// Resolve `code` in the error map and notify. `message` is the
    /// server-supplied text, used when the entry allows it; unknown codes
    /// surface it (or the code itself) verbatim.
    pub fn show_error(&self, code: &str, message: Option<&str>, request_id: Option<&str>) {
        let descriptor = describe(code);
        let body_key = match (lookup(code), message) {
            (None, Some(server)) => server,
            (None, None) => code,
            (Some(d), Some(server)) if d.set_message => server,
            (Some(d), _) => d.message,
        };
        let footer = request_id
            .filter(|_| descriptor.set_footer)
            .map(|id| format!("Request ID: {id}"));

        let toast = Toast::error(
            self.translator.translate(descriptor.title),
            self.translator.translate(body_key),
        )
        .with_footer(footer);
        self.notifier.notify(toast);
    }
}
