//! Uniform request dispatch against the platform REST API.
//!
//! Attaches a bearer token when one is supplied and normalizes non-2xx
//! responses into the server's structured `{msg}` payload. No retry, no
//! backoff, no timeout beyond transport defaults.

use gather_shared::config::ApiSettings;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

/// Error body the API serves on rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string(), http: reqwest::Client::new() }
    }

    pub fn from_settings(settings: &ApiSettings) -> Self {
        Self::new(settings.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path`, attaching `Authorization: Bearer <token>`
    /// iff a token is provided.
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Dispatch and decode. Non-2xx responses become
    /// [`ClientError::Api`] carrying the server's status and message.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.msg,
                Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
            };
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(response.json::<T>().await?)
    }
}
