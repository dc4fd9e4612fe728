//! Request and response bodies of the `/auth` REST surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::user::UserProfile;

#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct LogoutRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Body for `/auth/forgot` and `/auth/resend`.
#[derive(Serialize, Debug)]
pub struct LoginOnlyRequest<'a> {
    pub login: &'a str,
}

#[derive(Serialize, Debug)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

/// Token pair issued by `/auth/login` and `/auth/refresh`. Both tokens are
/// optional on the wire; their absence is detected by the caller.
#[derive(Deserialize, Debug, Default)]
pub struct TokenResponse {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

impl TokenResponse {
    /// Both tokens, when present and non-empty.
    pub fn token_pair(&self) -> Option<(String, String)> {
        match (&self.auth_token, &self.refresh_token) {
            (Some(a), Some(r)) if !a.is_empty() && !r.is_empty() => Some((a.clone(), r.clone())),
            _ => None,
        }
    }

    pub fn user_profile(&self) -> UserProfile {
        self.user
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// Whether a 2xx body reports application-level success.
/// Only an explicit `success: true` counts.
pub fn reports_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_pair_requires_both_tokens() {
        let full: TokenResponse =
            serde_json::from_value(json!({"auth_token": "A", "refresh_token": "R"})).unwrap();
        assert_eq!(full.token_pair(), Some(("A".into(), "R".into())));

        let partial: TokenResponse = serde_json::from_value(json!({"auth_token": "A"})).unwrap();
        assert_eq!(partial.token_pair(), None);

        let empty: TokenResponse =
            serde_json::from_value(json!({"auth_token": "", "refresh_token": "R"})).unwrap();
        assert_eq!(empty.token_pair(), None);
    }

    #[test]
    fn success_flag_must_be_explicit() {
        assert!(reports_success(&json!({"success": true})));
        assert!(!reports_success(&json!({"success": false})));
        assert!(!reports_success(&json!({})));
        assert!(!reports_success(&json!("ok")));
    }
}
