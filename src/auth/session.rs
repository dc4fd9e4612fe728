use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::models::{Session, StorageKey, UserProfile};
use crate::store::LocalStorage;

/// The shared session cell.
///
/// Anyone may hold a [`SessionReader`]; mutation goes through
/// `AuthStore`, which owns the only writer.
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session from the persistent store, so a restart keeps a
    /// remembered login. The legacy `token` key is honored when
    /// `auth_token` is absent.
    pub fn restore(storage: &LocalStorage) -> Self {
        let auth_token = storage
            .get(StorageKey::AuthToken.as_str())
            .or_else(|| storage.get(StorageKey::LegacyToken.as_str()));
        let session = Session {
            refresh_token: storage.get(StorageKey::RefreshToken.as_str()),
            user: UserProfile::from_stored(&storage.get_or(StorageKey::User.as_str(), "{}")),
            last_updated_at: storage.get(StorageKey::LastUpdatedAt.as_str()),
            auth_token,
        };
        debug!(logged_in = session.is_logged_in(), "session restored from persistent store");
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            inner: self.inner.clone(),
        }
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read-only view of the live session.
#[derive(Clone)]
pub struct SessionReader {
    inner: Arc<RwLock<Session>>,
}

impl SessionReader {
    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    pub fn auth_token(&self) -> Option<String> {
        self.read().auth_token.clone()
    }

    pub fn user(&self) -> UserProfile {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }
}
