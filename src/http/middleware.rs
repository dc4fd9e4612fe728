use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION};
use tracing::{debug, warn};

use super::log_path;
use crate::auth::SessionReader;

/// A step run on every outgoing request before it is sent.
pub trait RequestMiddleware: Send + Sync {
    fn name(&self) -> &str;
    fn on_request(&self, path: &str, headers: &mut HeaderMap);
}

/// Attaches `Authorization: Bearer <token>` from the live session, except
/// on public endpoints.
pub struct BearerAuth {
    session: SessionReader,
    public_endpoints: Vec<String>,
}

impl BearerAuth {
    pub fn new(session: SessionReader, public_endpoints: Vec<String>) -> Self {
        Self {
            session,
            public_endpoints,
        }
    }

    /// Whether `path` falls under one of the public prefixes, matched on
    /// whole path segments (`/auth/verify` covers `/auth/verify/abc`, not
    /// `/auth/verifyx`).
    pub fn is_public(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or_default();
        self.public_endpoints.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl RequestMiddleware for BearerAuth {
    fn name(&self) -> &str {
        "bearer-auth"
    }

    fn on_request(&self, path: &str, headers: &mut HeaderMap) {
        if self.is_public(path) {
            return;
        }
        let Some(token) = self.session.auth_token() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
                debug!(path = log_path(path).as_str(), "bearer token attached");
            }
            Err(_) => warn!(
                path = log_path(path).as_str(),
                "auth token is not a valid header value; sent without it"
            ),
        }
    }
}

/// Sends the negotiated display locale so the backend can localize the
/// e-mails it sends.
pub struct AcceptLanguage {
    value: Option<HeaderValue>,
}

impl AcceptLanguage {
    pub fn new(locale: &str) -> Self {
        Self {
            value: HeaderValue::from_str(locale).ok(),
        }
    }
}

impl RequestMiddleware for AcceptLanguage {
    fn name(&self) -> &str {
        "accept-language"
    }

    fn on_request(&self, _path: &str, headers: &mut HeaderMap) {
        if let Some(value) = &self.value {
            headers.insert(ACCEPT_LANGUAGE, value.clone());
        }
    }
}
