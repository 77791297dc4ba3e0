//! The authenticated request gateway.
//!
//! Every backend call goes through [`Gateway::execute`], which runs two
//! phases around the transport:
//!
//! - [`Gateway::before_send`] reads the session credential fresh from the
//!   credential store and sets `Authorization: Bearer <token>` when present.
//! - [`Gateway::after_receive`] turns non-2xx responses into [`ApiError`]s
//!   and, on HTTP 401, removes the session credential before the error is
//!   returned.
//!
//! Nothing here retries, redirects to login, or refreshes tokens.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::request::RequestBody;
use super::{ApiError, RequestContext};
use crate::auth::{CredentialKey, CredentialStore};

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Single outbound HTTP configuration shared by all feature services.
/// Clone is cheap - the reqwest client and the store are reference counted.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, store, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Outbound phase: attach the current session credential, if any.
    ///
    /// A store failure is treated like an absent credential so the request
    /// still goes out, unauthenticated.
    pub fn before_send(&self, mut request: Request) -> Request {
        let token = match self.store.get(CredentialKey::UserToken) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read session credential, sending unauthenticated");
                None
            }
        };

        let Some(token) = token else {
            return request;
        };

        match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => {
                warn!("Stored session credential is not a valid header value, sending unauthenticated");
            }
        }
        request
    }

    /// Inbound phase: pass successes through, map failures, purge on 401.
    pub async fn after_receive(
        &self,
        outcome: Result<Response, reqwest::Error>,
    ) -> Result<Response, ApiError> {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                if e.status() == Some(StatusCode::UNAUTHORIZED) {
                    self.purge_session();
                }
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Purge before anything else can observe the failure
        if status == StatusCode::UNAUTHORIZED {
            self.purge_session();
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    fn purge_session(&self) {
        match self.store.remove(CredentialKey::UserToken) {
            Ok(()) => debug!("Session credential rejected by backend, removed from store"),
            Err(e) => warn!(error = %e, "Failed to remove rejected session credential"),
        }
    }

    /// Run one request through both phases and the transport.
    pub async fn execute(&self, ctx: RequestContext) -> Result<Response, ApiError> {
        let (method, path, query, headers, body) = ctx.into_parts();

        let mut builder = self.client.request(method.clone(), self.url(&path)).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let request = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let request = self.before_send(request);

        debug!(
            method = %method,
            path = %path,
            authenticated = request.headers().contains_key(header::AUTHORIZATION),
            "Sending request"
        );

        let outcome = self.client.execute(request).await;
        let result = self.after_receive(outcome).await;

        match &result {
            Ok(response) => debug!(path = %path, status = %response.status(), "Request succeeded"),
            Err(e) => debug!(path = %path, error = %e, "Request failed"),
        }
        result
    }

    /// Execute and decode the JSON response body.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn send<T: DeserializeOwned>(&self, ctx: RequestContext) -> Result<T, ApiError> {
        let text = self.send_text(ctx).await?;
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Execute and return the raw response body unchanged.
    pub async fn send_text(&self, ctx: RequestContext) -> Result<String, ApiError> {
        let response = self.execute(ctx).await?;
        Ok(response.text().await?)
    }
}
