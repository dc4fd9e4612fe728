use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Backend endpoint settings for the shared HTTP client.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Base URL every API path is appended to, e.g. `https://articpad.example/api/v1`.
    pub base_url: String,
    /// Path prefixes that must never carry a bearer token.
    #[serde(default = "default_public_endpoints")]
    pub public_endpoints: Vec<String>,
}

pub fn default_public_endpoints() -> Vec<String> {
    [
        "/auth/login",
        "/auth/register",
        "/auth/forgot",
        "/auth/reset",
        "/auth/refresh",
        "/auth/resend",
        "/auth/verify",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
