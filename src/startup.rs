//! Client initialization.
//!
//! Builds the persistent store, restores the session, negotiates the
//! display locale and wires the HTTP client, router and auth store
//! together.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::auth::{AuthStore, SessionState};
use crate::config::ConfigV1;
use crate::errors::ErrorHandler;
use crate::http::{AcceptLanguage, ApiClient, BearerAuth};
use crate::i18n::{negotiate_locale, Catalog, CatalogError, Translator};
use crate::loading::LoadingState;
use crate::notify::Notifier;
use crate::router::{NavigationGuard, RouteTable, Router};
use crate::state::ClientState;
use crate::store::{create_backend, LocalStorage};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load message tables: {0}")]
    Messages(#[from] CatalogError),
}

/// Build the client from `config`. Toasts are delivered to `notifier`.
///
/// # Errors
///
/// Returns an error if a configured message table cannot be read or parsed.
pub fn build_client(
    config: Arc<ConfigV1>,
    notifier: Arc<dyn Notifier>,
) -> Result<ClientState, StartupError> {
    let storage = LocalStorage::new(create_backend(&config.store));
    let session = SessionState::restore(&storage);

    let i18n = &config.i18n;
    let locale = negotiate_locale(
        &i18n.preferred_locales,
        &i18n.available_locales,
        &i18n.default_locale,
    );
    let mut catalog = Catalog::new(locale.as_str(), i18n.default_locale.as_str());
    if let Some(dir) = &i18n.messages_dir {
        catalog = catalog.load_dir(dir, &i18n.available_locales)?;
    }
    let translator: Arc<dyn Translator> = Arc::new(catalog);

    let loading = LoadingState::new();
    let api = ApiClient::new(config.api.base_url.as_str())
        .with_middleware(BearerAuth::new(
            session.reader(),
            config.api.public_endpoints.clone(),
        ))
        .with_middleware(AcceptLanguage::new(&locale))
        .with_loading(loading.clone());

    let guard = NavigationGuard::new(Arc::new(RouteTable::articpad()), translator.clone());
    let router = Arc::new(Router::new(guard, session.reader(), loading.clone()));

    let reader = session.reader();
    let auth = Arc::new(AuthStore::new(
        session,
        storage,
        api.clone(),
        ErrorHandler::new(notifier.clone(), translator.clone()),
        notifier.clone(),
        translator.clone(),
        router.clone(),
    ));

    info!(
        locale = locale.as_str(),
        logged_in = reader.is_logged_in(),
        "ArticPad client ready"
    );

    Ok(ClientState {
        config,
        auth,
        session: reader,
        router,
        api,
        loading,
        translator,
        notifier,
    })
}
