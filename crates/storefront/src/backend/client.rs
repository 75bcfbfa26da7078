use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::BackendError;
use crate::config::BackendConfig;

/// Client for the backend REST API.
///
/// Cheap to clone. The bearer token is per-copy: use [`Self::with_token`] to
/// derive an authenticated client for one visitor without touching the
/// shared connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
    token: Option<SecretString>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("smarthome-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
            token: None,
        })
    }

    /// A copy of this client that sends `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token: Some(SecretString::from(token.to_owned())),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL from path segments and query pairs.
    ///
    /// Segments are appended to the base URL's path and percent-encoded.
    pub(super) fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send a request and decode its JSON body.
    pub(super) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, BackendError> {
        let text = self.execute(method, url, body).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to decode backend response"
            );
            BackendError::Malformed(e)
        })
    }

    /// Send a request whose response body is not needed.
    pub(super) async fn request_empty(
        &self,
        method: Method,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<(), BackendError> {
        self.execute(method, url, body).await.map(drop)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<String, BackendError> {
        let mut request = self.inner.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(BackendError::from_response(status, &text));
        }

        Ok(text)
    }
}

/// Placeholder body type for requests without one.
pub(super) const NO_BODY: Option<&()> = None;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            api_url: Url::parse(base).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://localhost:8000/api")
            .endpoint(&["products", "42"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/products/42");

        let url = client("http://localhost:8000/api/")
            .endpoint(&["products"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/products");
    }

    #[test]
    fn test_endpoint_encodes_segments_and_query() {
        let url = client("http://localhost:8000")
            .endpoint(
                &["articles", "slug", "best bulbs/2024"],
                &[("search", "smart plug".to_owned())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/articles/slug/best%20bulbs%2F2024?search=smart+plug"
        );
    }

    #[test]
    fn test_with_token_shares_pool() {
        let anonymous = client("http://localhost:8000");
        let authed = anonymous.with_token("abc");
        assert!(!anonymous.is_authenticated());
        assert!(authed.is_authenticated());
        assert!(Arc::ptr_eq(&anonymous.inner, &authed.inner));
    }
}
