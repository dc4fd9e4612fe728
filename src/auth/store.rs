use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::session::{SessionReader, SessionState};
use super::validation::validate_registration;
use crate::errors::{AppError, ErrorHandler, RequestFailure};
use crate::http::{path_with_segment, ApiClient};
use crate::i18n::Translator;
use crate::models::{
    reports_success, LoginOnlyRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RegisterRequest, ResetPasswordRequest, Session, StorageKey, TokenResponse,
};
use crate::notify::{Notifier, Toast};
use crate::router::{post_login_target, Location, Navigator, LOGIN_PATH};
use crate::store::LocalStorage;

/// Owner of the session: the only component that mutates it or writes the
/// session keys to the persistent store.
///
/// Every action reports its failures through the [`ErrorHandler`] before
/// returning them, so callers only need the `Err` for their own cleanup.
pub struct AuthStore {
    session: SessionState,
    storage: LocalStorage,
    api: ApiClient,
    errors: ErrorHandler,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
    navigator: Arc<dyn Navigator>,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl AuthStore {
    pub fn new(
        session: SessionState,
        storage: LocalStorage,
        api: ApiClient,
        errors: ErrorHandler,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            storage,
            api,
            errors,
            notifier,
            translator,
            navigator,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn session(&self) -> SessionReader {
        self.session.reader()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_logged_in()
    }

    pub async fn login(
        &self,
        login: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(), AppError> {
        let epoch = self.epoch();
        let ticket = self.ticket();
        let body = match self.api.post("/auth/login", &LoginRequest { login, password }).await {
            Ok(body) => body,
            Err(failure) => return Err(self.fail(failure, epoch).await),
        };
        if explicitly_failed(&body) {
            return Err(self.fail(RequestFailure::Rejected { body }, epoch).await);
        }

        let tokens: TokenResponse = serde_json::from_value(body).unwrap_or_default();
        let Some((auth_token, refresh_token)) = tokens.token_pair() else {
            return Err(self.fail(RequestFailure::MissingToken, epoch).await);
        };
        if !self.accept(ticket, "login") {
            return Ok(());
        }

        let session = Session::issued(auth_token, refresh_token, tokens.user_profile(), Utc::now());
        if remember_me {
            self.persist(&session);
        }
        *self.session.write() = session;
        info!(
            event_name = "auth.login",
            event_domain = "auth",
            remember_me,
            "user logged in"
        );

        let target = post_login_target(&self.navigator.current());
        self.navigator.push(target);
        Ok(())
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let epoch = self.epoch();
        let invalid = validate_registration(username, email, password);
        if !invalid.is_empty() {
            debug!(fields = invalid.len(), "registration form rejected locally");
            return Err(self.fail(RequestFailure::Invalid(invalid), epoch).await);
        }

        let request = RegisterRequest {
            username,
            email,
            password,
        };
        self.confirmed(self.api.post("/auth/register", &request).await, epoch).await?;
        info!(event_name = "auth.register", event_domain = "auth", "account registered");
        self.success("auth.sign_up", "auth.account_created");
        self.navigator.push(Location::new(LOGIN_PATH));
        Ok(())
    }

    /// End the session. The server is told on a best-effort basis; the local
    /// session is always cleared.
    pub async fn logout(&self) {
        let ticket = self.ticket();
        self.applied.fetch_max(ticket, Ordering::SeqCst);

        let (logged_in, refresh_token) = {
            let session = self.session.read();
            (session.is_logged_in(), session.refresh_token.clone())
        };
        if logged_in {
            let request = LogoutRequest {
                session_token: refresh_token.as_deref(),
            };
            if let Err(failure) = self.api.post("/auth/logout", &request).await {
                warn!(
                    event_name = "auth.logout",
                    event_domain = "auth",
                    failure = %failure,
                    "server logout failed, clearing local session anyway"
                );
            }
        }

        *self.session.write() = Session::default();
        let keys: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        self.storage.remove_many(&keys);
        info!(event_name = "auth.logout", event_domain = "auth", "user logged out");
        self.navigator.push(Location::new(LOGIN_PATH));
    }

    /// Exchange the refresh token for a new pair. The pair is written to the
    /// persistent store only when the session was already persisted there.
    pub async fn refresh_token(&self) -> Result<(), AppError> {
        let epoch = self.epoch();
        let current = self.session.read().refresh_token.clone();
        let Some(refresh_token) = current else {
            return Err(self.fail(RequestFailure::MissingToken, epoch).await);
        };
        let ticket = self.ticket();
        let request = RefreshRequest {
            refresh_token: &refresh_token,
        };
        let body = match self.api.post("/auth/refresh", &request).await {
            Ok(body) => body,
            Err(failure) => return Err(self.fail(failure, epoch).await),
        };
        if explicitly_failed(&body) {
            return Err(self.fail(RequestFailure::Rejected { body }, epoch).await);
        }

        let tokens: TokenResponse = serde_json::from_value(body).unwrap_or_default();
        let Some((auth_token, refresh_token)) = tokens.token_pair() else {
            return Err(self.fail(RequestFailure::MissingToken, epoch).await);
        };
        if !self.accept(ticket, "refresh") {
            return Ok(());
        }

        let user = if tokens.user.is_some() {
            tokens.user_profile()
        } else {
            self.session.read().user.clone()
        };
        let session = Session::issued(auth_token, refresh_token, user, Utc::now());
        let was_persisted = self.storage.get(StorageKey::AuthToken.as_str()).is_some()
            || self.storage.get(StorageKey::LegacyToken.as_str()).is_some();
        if was_persisted {
            self.persist(&session);
        }
        *self.session.write() = session;
        info!(
            event_name = "auth.refresh",
            event_domain = "auth",
            persisted = was_persisted,
            "tokens refreshed"
        );
        Ok(())
    }

    pub async fn request_password_reset(&self, login: &str) -> Result<(), AppError> {
        let epoch = self.epoch();
        let result = self.api.post("/auth/forgot", &LoginOnlyRequest { login }).await;
        self.confirmed(result, epoch).await?;
        self.success("auth.password_reset_requested", "auth.password_reset_requested_msg");
        self.navigator.push(Location::new(LOGIN_PATH));
        Ok(())
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        let epoch = self.epoch();
        let request = ResetPasswordRequest { token, password };
        self.confirmed(self.api.post("/auth/reset", &request).await, epoch).await?;
        self.success("routes.password_reset", "auth.password_reset_success");
        self.navigator.push(Location::new(LOGIN_PATH));
        Ok(())
    }

    pub async fn resend_verification_email(&self, login: &str) -> Result<(), AppError> {
        let epoch = self.epoch();
        let result = self.api.post("/auth/resend", &LoginOnlyRequest { login }).await;
        self.confirmed(result, epoch).await?;
        self.success("auth.account_verification", "auth.account_verification_resent");
        Ok(())
    }

    pub async fn verify_account(&self, token: &str) -> Result<(), AppError> {
        let epoch = self.epoch();
        let path = path_with_segment("/auth/verify", token.trim());
        self.confirmed(self.api.get(&path).await, epoch).await?;
        self.success("auth.account_verification", "auth.account_verified_successfully");
        self.navigator.push(Location::new(LOGIN_PATH));
        Ok(())
    }

    /// Require an explicit `success: true` from a 2xx answer.
    async fn confirmed(
        &self,
        result: Result<Value, RequestFailure>,
        epoch: u64,
    ) -> Result<Value, AppError> {
        match result {
            Ok(body) if reports_success(&body) => Ok(body),
            Ok(body) => Err(self.fail(RequestFailure::Rejected { body }, epoch).await),
            Err(failure) => Err(self.fail(failure, epoch).await),
        }
    }

    /// Report `failure` and drop the session when the backend no longer
    /// accepts it, unless the user is already on the login page.
    ///
    /// `epoch` is the sequence the action started under. A rejection of a
    /// session that a later login, refresh or logout has since replaced is
    /// still reported but leaves the current session alone.
    async fn fail(&self, failure: RequestFailure, epoch: u64) -> AppError {
        let error = self.errors.handle(failure);
        if !error.invalidates_session() || self.navigator.current().path == LOGIN_PATH {
            return error;
        }
        let newest = self.epoch();
        if newest > epoch {
            info!(code = error.code(), epoch, newest, "stale rejection, session kept");
        } else {
            info!(code = error.code(), "session rejected by backend, logging out");
            self.logout().await;
        }
        error
    }

    fn persist(&self, session: &Session) {
        let Some(entries) = session.persisted_entries() else {
            return;
        };
        let pairs: Vec<(&str, &str)> = entries.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.storage.set_many(&pairs);
    }

    fn success(&self, title: &str, message: &str) {
        self.notifier.notify(Toast::success(
            self.translator.translate(title),
            self.translator.translate(message),
        ));
    }

    fn epoch(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }

    fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim the session for `ticket`; false when a newer action already
    /// applied its result.
    fn accept(&self, ticket: u64, action: &str) -> bool {
        let newest = self.applied.fetch_max(ticket, Ordering::SeqCst);
        if newest > ticket {
            info!(action, ticket, newest, "stale response discarded");
            return false;
        }
        true
    }
}

fn explicitly_failed(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
}
