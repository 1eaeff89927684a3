//! Page retrieval with bounded retry.
//!
//! The [`Transport`] trait is the raw GET capability; [`HttpTransport`] is the
//! reqwest-backed implementation. [`fetch_with_retry`] layers the retry policy
//! on top: transport errors are retried after a fixed delay, while any
//! non-200 response fails immediately.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{Result, SerialistError};

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "NovelScraper/1.0 (+your_email@example.com)";

/// A response as seen by the retry layer: status code and decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Raw GET capability.
///
/// Implementations return `Ok` for any HTTP response, whatever its status,
/// and reserve `Err` for transport failures ([`SerialistError::Transport`] or
/// [`SerialistError::Timeout`]).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url, headers: &[(String, String)], timeout: Duration) -> Result<HttpResponse>;
}

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Maximum number of attempts per URL.
    pub retries: u32,
    /// Sleep between attempts after a transport error.
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: 3,
            retry_delay: Duration::from_secs(3),
        }
    }
}

impl FetchConfig {
    /// The only header the pipeline sends.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![("User-Agent".to_string(), self.user_agent.clone())]
    }
}

/// Fetches `url` and returns the body of a 200 response.
///
/// Makes up to `config.retries` attempts (at least one). A non-200 status is
/// terminal on the first occurrence. A transport error sleeps
/// `config.retry_delay` before the next attempt; after the final attempt the
/// error is returned without sleeping.
pub async fn fetch_with_retry(transport: &dyn Transport, url: &Url, config: &FetchConfig) -> Result<String> {
    let attempts = config.retries.max(1);
    let headers = config.headers();
    let timeout = Duration::from_secs(config.timeout);

    let mut attempt = 1;
    loop {
        tracing::info!("[{attempt}/{attempts}] GET {url}");

        match transport.get(url, &headers, timeout).await {
            Ok(response) if response.status == 200 => {
                tracing::debug!(%url, bytes = response.body.len(), "fetched");
                return Ok(response.body);
            }
            Ok(response) => {
                tracing::warn!(%url, status = response.status, "non-200 response, not retrying");
                return Err(SerialistError::HttpStatus { url: url.to_string(), status: response.status });
            }
            Err(err) if err.is_transient() => {
                tracing::warn!(%url, attempt, error = %err, "fetch attempt failed");
                if attempt >= attempts {
                    return Err(err);
                }
                tokio::time::sleep(config.retry_delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// reqwest-backed [`Transport`].
///
/// Holds one client for the whole run so connections are reused between the
/// index page and the chapters.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "fetch")]
impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client, e.g. one configured with a proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, headers: &[(String, String)], timeout: Duration) -> Result<HttpResponse> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                SerialistError::Timeout { url: url.to_string(), timeout: timeout.as_secs() }
            } else {
                SerialistError::Transport { url: url.to_string(), reason: e.to_string() }
            }
        };

        let mut request = self.client.get(url.clone()).timeout(timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        Ok(HttpResponse { status, body })
    }
}
