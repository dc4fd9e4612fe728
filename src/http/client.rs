use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::log_path;
use super::middleware::RequestMiddleware;
use crate::errors::RequestFailure;
use crate::loading::LoadingState;

/// The single backend client. Every call goes through the middleware chain
/// in registration order; failures come back as [`RequestFailure`] for the
/// error handler. No retries, no timeouts beyond reqwest's defaults.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    middleware: Vec<Arc<dyn RequestMiddleware>>,
    loading: LoadingState,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Creating API client for '{}'", base_url);
        Self {
            http: reqwest::Client::new(),
            base_url,
            middleware: Vec::new(),
            loading: LoadingState::new(),
        }
    }

    pub fn with_middleware(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        debug!(middleware = middleware.name(), "registering request middleware");
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Report in-flight requests through a shared loading indicator.
    pub fn with_loading(mut self, loading: LoadingState) -> Self {
        self.loading = loading;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Value, RequestFailure> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RequestFailure> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Send a request and return the JSON body of a 2xx answer.
    ///
    /// Non-JSON bodies are kept as a JSON string so nothing the backend said
    /// is lost; an empty body is `null`.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, RequestFailure> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let mut request = builder.build()?;
        for middleware in &self.middleware {
            middleware.on_request(path, request.headers_mut());
        }

        let _in_flight = self.loading.api_request();
        let logged = log_path(path);
        debug!(%method, path = logged.as_str(), "sending API request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(text);
        debug!(
            %method,
            path = logged.as_str(),
            status = status.as_u16(),
            "API response received"
        );

        if status.is_success() {
            Ok(body)
        } else {
            Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
