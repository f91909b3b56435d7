//! Generic HTTP client facade for the expense API.
//!
//! # Design
//! `ApiClient` centralizes URL construction, header injection, JSON
//! (de)serialization, and error normalization so resource services only
//! supply a path and a payload/response type. Every operation returns
//! `Result<T, ApiError>` — transport faults and non-2xx statuses are
//! absorbed into the `Err` arm, never panics.
//!
//! The client is a cheap `Arc` handle; clones share the configuration and
//! the bearer-token slot, matching a configured-once shared instance. The
//! token is written only by explicit login/logout actions and read by every
//! request, so a `std::sync::RwLock` (never held across an await) suffices.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{self, ApiError};
use crate::http::{build_url, Query};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "EXPENSE_API_BASE_URL";

/// Local development address used when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Async client for the expense API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: Url,
    bearer: RwLock<Option<String>>,
}

/// Configures and builds an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Enforce a total per-request timeout. The server side enforces none,
    /// so without this a stalled request waits indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        // A trailing slash makes Url::join treat the base path as a
        // directory, so "/api/v1" + "accounts" keeps the prefix.
        let normalized = format!("{}/", self.base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(error::error_message(&e)))?;

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                bearer: RwLock::new(None),
            }),
        })
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: &str) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.to_string(),
            timeout: None,
        }
    }

    /// Build a client from [`BASE_URL_ENV`], falling back to
    /// [`DEFAULT_BASE_URL`] when unset.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_env_value(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ApiError> {
        Self::new(value.unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Attach `Authorization: Bearer <token>` to every subsequent request.
    /// Visible to all clones of this client.
    pub fn set_bearer_token(&self, token: &str) {
        *self
            .inner
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Stop sending the `Authorization` header.
    pub fn clear_bearer_token(&self) {
        *self
            .inner
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, Some(query), None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, None, Some(to_body(body)?))
            .await
    }

    /// POST with no request body, for trigger-style endpoints.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, None, None).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, None, Some(to_body(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let url = build_url(&self.inner.base_url, path, query)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .inner
            .http
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "transport failure");
                return Err(ApiError::Transport(error::error_message(&e)));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error::detail_from_body(status.as_u16(), &body);
            tracing::warn!(%url, status = status.as_u16(), %detail, "request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(error::error_message(&e)))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn to_body(body: &impl Serialize) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn base_url_path_prefix_survives() {
        let client = ApiClient::new("http://localhost:8000/api/v1/").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/v1/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn bearer_token_is_shared_across_clones() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let clone = client.clone();
        client.set_bearer_token("abc");
        assert_eq!(clone.bearer().as_deref(), Some("abc"));
        clone.clear_bearer_token();
        assert!(client.bearer().is_none());
    }

    #[test]
    fn missing_env_value_falls_back_to_default() {
        let client = ApiClient::from_env_value(None).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn env_value_overrides_default() {
        let client = ApiClient::from_env_value(Some("http://example.com:9000")).unwrap();
        assert_eq!(client.base_url().as_str(), "http://example.com:9000/");
    }
}
