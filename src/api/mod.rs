//! HTTP gateway to the helpdesk REST API.
//!
//! Every outbound call goes through [`ApiClient`]: it resolves request paths
//! against the configured base URL, sets the JSON content type, attaches the
//! bearer token when the client carries one, and logs each request and each
//! failure. It performs no retries and sets no timeout beyond reqwest's
//! defaults.
//!
//! The token is part of the client value. [`ApiClient::with_token`] returns a
//! new client instead of mutating shared default headers, so an anonymous
//! client and an authenticated one can coexist.
//!
//! # Security Note - Logging
//!
//! The Authorization header is marked sensitive and the token is kept in a
//! [`SecretString`], so neither `Debug` output nor reqwest's own request
//! logging prints it.

mod auth;
mod error;
mod tickets;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Result, TickkkError};

pub use error::ApiError;
pub use tickets::TicketQuery;

/// Successful response: status plus decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: T,
}

/// Cloneable handle to the REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<Arc<SecretString>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiClient {
    /// Create an anonymous client for `base_url`.
    ///
    /// A base URL whose path lacks a trailing slash gets one, so request paths
    /// are appended rather than replacing the last segment.
    pub fn new(mut base_url: Url) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Create an anonymous client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.resolved_base_url()?)
    }

    /// A copy of this client that sends `Authorization: Bearer <token>`.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(Arc::new(SecretString::from(token.to_string()))),
        }
    }

    /// A copy of this client without a bearer token.
    pub fn anonymous(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn auth_header(&self) -> Result<Option<HeaderValue>> {
        let Some(token) = &self.token else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| {
                TickkkError::Config("session token contains invalid header characters".into())
            })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    /// Issue a request and decode a JSON response body.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("Making {} request to {}", method, path);

        let mut request = self
            .http
            .request(method, self.url(path)?)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        if let Some(auth) = self.auth_header()? {
            request = request.header(header::AUTHORIZATION, auth);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error: {e}");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = ApiError::from_body(status, &text);
            match &error.body {
                Some(body) => tracing::error!("API Error: {body}"),
                None => tracing::error!("API Error: {}", error.message),
            }
            return Err(error.into());
        }

        let data = response.json::<T>().await.map_err(|e| {
            tracing::error!("API Error: {e}");
            TickkkError::from(e)
        })?;
        Ok(ApiResponse { status, data })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, &[], Some(body)).await
    }
}
