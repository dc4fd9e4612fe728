use serde_json::Value;
use thiserror::Error;

use super::failure::RequestFailure;

/// Error code of the frontend-defined "please log in again" entry.
pub const LOG_IN_AGAIN: &str = "LOG_IN_AGAIN";
pub const NET_ERR: &str = "NET_ERR";
pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
}

/// Every failure the client can surface. Each variant ends in exactly one
/// toast, except `ValidationFailed` which yields one per field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("backend is unreachable")]
    NetworkUnreachable,
    #[error("session is no longer valid ({code})")]
    Unauthorized {
        code: String,
        message: Option<String>,
        request_id: Option<String>,
    },
    #[error("{} field(s) failed validation", .fields.len())]
    ValidationFailed {
        fields: Vec<FieldError>,
        request_id: Option<String>,
    },
    #[error("backend rejected the request ({code})")]
    BackendRejected {
        code: String,
        message: Option<String>,
        request_id: Option<String>,
    },
    #[error("backend sent an unrecognized error response")]
    UnknownBackendResponse {
        body: Value,
        request_id: Option<String>,
    },
    #[error("auth response did not carry the expected tokens")]
    MissingToken,
}

impl AppError {
    /// Whether this error means the local session must be dropped.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    /// The error-map key the error is reported under. Validation errors
    /// report the code of their first field.
    pub fn code(&self) -> &str {
        match self {
            AppError::NetworkUnreachable => NET_ERR,
            AppError::Unauthorized { code, .. } | AppError::BackendRejected { code, .. } => {
                code.as_str()
            }
            AppError::ValidationFailed { fields, .. } => fields
                .first()
                .map(|f| f.code.as_str())
                .unwrap_or(UNKNOWN_ERROR),
            AppError::UnknownBackendResponse { .. } => UNKNOWN_ERROR,
            AppError::MissingToken => MISSING_TOKEN,
        }
    }

    /// Classify a raw failure. Checks, in order: transport failure,
    /// unauthorized status, field error list, single error code, raw body.
    pub fn classify(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(_) => AppError::NetworkUnreachable,
            RequestFailure::MissingToken => AppError::MissingToken,
            RequestFailure::Invalid(fields) => AppError::ValidationFailed {
                fields: fields
                    .into_iter()
                    .filter_map(|(field, codes)| {
                        codes.into_iter().next().map(|code| FieldError { field, code })
                    })
                    .collect(),
                request_id: None,
            },
            RequestFailure::Status { status, body } if is_unauthorized(status, &body) => {
                let parsed = ErrorBody::parse(&body);
                AppError::Unauthorized {
                    code: text_field(&body, "error_code")
                        .unwrap_or_else(|| LOG_IN_AGAIN.to_string()),
                    message: text_field(&body, "error"),
                    request_id: parsed.request_id,
                }
            }
            RequestFailure::Status { body, .. } | RequestFailure::Rejected { body } => {
                ErrorBody::parse(&body).into_error(body)
            }
        }
    }
}

fn is_unauthorized(status: u16, body: &Value) -> bool {
    status == 401 || body.as_str() == Some("Unauthorized")
}

fn text_field(body: &Value, name: &str) -> Option<String> {
    body.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Tagged view of a backend error body.
#[derive(Debug, PartialEq)]
enum ErrorShape {
    Fields(Vec<FieldError>),
    Coded { code: String, message: Option<String> },
    Raw,
}

#[derive(Debug)]
struct ErrorBody {
    shape: ErrorShape,
    request_id: Option<String>,
}

impl ErrorBody {
    fn parse(body: &Value) -> Self {
        let request_id = text_field(body, "requestId").or_else(|| text_field(body, "request_id"));

        let mut fields: Vec<FieldError> = body
            .get("errors")
            .and_then(Value::as_object)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|(field, messages)| {
                        first_message(messages).map(|code| FieldError {
                            field: field.clone(),
                            code,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        let shape = if !fields.is_empty() {
            ErrorShape::Fields(fields)
        } else if let Some(code) = text_field(body, "error_code") {
            ErrorShape::Coded {
                code,
                message: text_field(body, "error"),
            }
        } else if let Some(error) = text_field(body, "error") {
            ErrorShape::Coded {
                code: error.clone(),
                message: Some(error),
            }
        } else {
            ErrorShape::Raw
        };

        Self { shape, request_id }
    }

    fn into_error(self, body: Value) -> AppError {
        let request_id = self.request_id;
        match self.shape {
            ErrorShape::Fields(fields) => AppError::ValidationFailed { fields, request_id },
            ErrorShape::Coded { code, message } => AppError::BackendRejected {
                code,
                message,
                request_id,
            },
            ErrorShape::Raw => AppError::UnknownBackendResponse { body, request_id },
        }
    }
}

/// A field's messages may be a list or a single string.
fn first_message(messages: &Value) -> Option<String> {
    match messages {
        Value::Array(list) => list.first().and_then(Value::as_str).map(str::to_string),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(code: u16, body: Value) -> AppError {
        AppError::classify(RequestFailure::Status { status: code, body })
    }

    #[test]
    fn transport_failure_is_network_error() {
        let err = AppError::classify(RequestFailure::Transport("connection refused".into()));
        assert_eq!(err, AppError::NetworkUnreachable);
        assert_eq!(err.code(), "NET_ERR");
    }

    #[test]
    fn unauthorized_uses_error_code_or_default() {
        let err = status(401, json!({"error_code": "invalid_credentials", "requestId": "r-1"}));
        assert!(err.invalidates_session());
        assert_eq!(err.code(), "invalid_credentials");
        assert!(matches!(
            err,
            AppError::Unauthorized { request_id: Some(ref id), .. } if id == "r-1"
        ));

        let err = status(401, json!({}));
        assert_eq!(err.code(), LOG_IN_AGAIN);

        let err = status(500, json!("Unauthorized"));
        assert!(err.invalidates_session());
    }

    #[test]
    fn field_errors_take_precedence_over_codes() {
        let err = status(
            422,
            json!({
                "error_code": "bad_request",
                "errors": {
                    "username": ["username_length_less_than_3", "other"],
                    "email": ["invalid_email"]
                },
                "requestId": "r-2"
            }),
        );

        match err {
            AppError::ValidationFailed { fields, request_id } => {
                assert_eq!(request_id.as_deref(), Some("r-2"));
                assert_eq!(
                    fields,
                    vec![
                        FieldError { field: "email".into(), code: "invalid_email".into() },
                        FieldError {
                            field: "username".into(),
                            code: "username_length_less_than_3".into()
                        },
                    ]
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn single_code_maps_directly() {
        let err = status(409, json!({"error_code": "username_already_exists", "error": "taken"}));
        assert_eq!(
            err,
            AppError::BackendRejected {
                code: "username_already_exists".into(),
                message: Some("taken".into()),
                request_id: None,
            }
        );

        let err = status(400, json!({"error": "bad_request"}));
        assert_eq!(err.code(), "bad_request");
    }

    #[test]
    fn rejected_success_body_is_classified_like_a_status_error() {
        let body = json!({"success": false, "error_code": "mail_not_enabled"});
        let from_2xx = AppError::classify(RequestFailure::Rejected { body: body.clone() });
        let from_4xx = status(400, body);
        assert_eq!(from_2xx, from_4xx);
    }

    #[test]
    fn unrecognized_shape_keeps_raw_body() {
        let body = json!({"success": false});
        let err = AppError::classify(RequestFailure::Rejected { body: body.clone() });
        assert_eq!(
            err,
            AppError::UnknownBackendResponse { body, request_id: None }
        );
    }

    #[test]
    fn client_side_validation_becomes_field_errors() {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("password".to_string(), vec!["password_strength".to_string()]);
        let err = AppError::classify(RequestFailure::Invalid(fields));
        assert_eq!(err.code(), "password_strength");
    }
}
