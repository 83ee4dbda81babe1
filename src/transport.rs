use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::Method;
use reqwest::header::CONTENT_TYPE;

use crate::error::Result;

/// Raw outcome of a single HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// The wire capability consumed by the client.
///
/// GET requests carry `params` in the query string, POST requests as a
/// url-encoded form body; `authorization` is attached verbatim as the
/// `Authorization` header. Timeouts, pooling and cancellation belong to
/// the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        authorization: &str,
    ) -> Result<RawResponse>;

    /// Fetch a remote resource as raw bytes (media upload source).
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing `reqwest::Client`, keeping its pool and timeouts.
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestTransport { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        authorization: &str,
    ) -> Result<RawResponse> {
        let request = if method == Method::GET {
            self.inner.get(url).query(params)
        } else {
            self.inner.request(method, url).form(params)
        };
        let response = request.header(AUTHORIZATION, authorization).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.inner.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
