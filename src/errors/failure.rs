use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Raw outcome of a failed call, before classification.
#[derive(Debug, Clone, Error)]
pub enum RequestFailure {
    /// The request never produced a response.
    #[error("backend unreachable: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("backend answered HTTP {status}")]
    Status { status: u16, body: Value },
    /// A 2xx answer whose body reports failure (`success: false`) or lacks
    /// an expected field.
    #[error("backend rejected the request")]
    Rejected { body: Value },
    /// A token-issuing call succeeded without carrying both tokens.
    #[error("auth response is missing its tokens")]
    MissingToken,
    /// Client-side form validation failed; field name to error codes.
    #[error("client-side validation failed")]
    Invalid(BTreeMap<String, Vec<String>>),
}

impl From<reqwest::Error> for RequestFailure {
    fn from(e: reqwest::Error) -> Self {
        RequestFailure::Transport(e.to_string())
    }
}
