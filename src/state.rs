//! Shared client state.
//!
//! Everything a view layer needs, built once by
//! [`build_client`](crate::startup::build_client).

use std::sync::Arc;

use crate::auth::{AuthStore, SessionReader};
use crate::config::ConfigV1;
use crate::http::ApiClient;
use crate::i18n::Translator;
use crate::loading::LoadingState;
use crate::notify::Notifier;
use crate::router::Router;

/// Handles shared by every view. Cheap to clone.
#[derive(Clone)]
pub struct ClientState {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session owner; all login/logout/refresh actions go through it.
    pub auth: Arc<AuthStore>,
    /// Read-only view of the live session.
    pub session: SessionReader,
    pub router: Arc<Router>,
    pub api: ApiClient,
    pub loading: LoadingState,
    pub translator: Arc<dyn Translator>,
    pub notifier: Arc<dyn Notifier>,
}
