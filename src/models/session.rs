use chrono::{DateTime, SecondsFormat, Utc};

use super::user::UserProfile;

/// Keys the session occupies in the persistent store. They are flat (no
/// prefix) and always written and cleared together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    AuthToken,
    /// Pre-refresh-token revisions stored the bearer credential here.
    LegacyToken,
    RefreshToken,
    User,
    LastUpdatedAt,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::AuthToken,
        StorageKey::LegacyToken,
        StorageKey::RefreshToken,
        StorageKey::User,
        StorageKey::LastUpdatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::AuthToken => "auth_token",
            StorageKey::LegacyToken => "token",
            StorageKey::RefreshToken => "refresh_token",
            StorageKey::User => "user",
            StorageKey::LastUpdatedAt => "lastUpdatedAt",
        }
    }
}

/// In-memory session state. `is_logged_in` is derived from the auth token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub auth_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: UserProfile,
    /// ISO-8601 instant the tokens were last issued.
    pub last_updated_at: Option<String>,
}

impl Session {
    /// A freshly issued session stamped with `now`.
    pub fn issued(
        auth_token: String,
        refresh_token: String,
        user: UserProfile,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            auth_token: Some(auth_token),
            refresh_token: Some(refresh_token),
            user,
            last_updated_at: Some(iso_timestamp(now)),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_token.is_some()
    }

    /// The four persisted entries, or `None` while anonymous.
    pub fn persisted_entries(&self) -> Option<Vec<(&'static str, String)>> {
        let auth_token = self.auth_token.clone()?;
        Some(vec![
            (StorageKey::AuthToken.as_str(), auth_token),
            (
                StorageKey::RefreshToken.as_str(),
                self.refresh_token.clone().unwrap_or_default(),
            ),
            (StorageKey::User.as_str(), self.user.to_stored()),
            (
                StorageKey::LastUpdatedAt.as_str(),
                self.last_updated_at.clone().unwrap_or_default(),
            ),
        ])
    }
}

/// `Date.prototype.toISOString` shape: millisecond precision, `Z` suffix.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
