//! HTTP page fetcher with rate limiting
//!
//! One GET per call, no retries: a URL that fails is terminal for this
//! crawler. Non-2xx responses are returned as fetched pages so the caller can
//! classify their bodies; only transport-level failures surface as errors.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::FetchError;

/// A fetched page: HTTP status plus decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code of the response
    pub http_code: i32,

    /// Decoded response body
    pub body: String,
}

/// Abstraction over the page-fetch capability
///
/// The engine only ever sees this trait, so tests can substitute an
/// in-memory site for the real HTTP client.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Perform exactly one GET for `url` within the configured deadline
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Settings for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetcherSettings {
    /// Per-request timeout
    pub timeout: Duration,

    /// Requests per second; unlimited when `None`
    pub rate_limit: Option<NonZeroU32>,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            user_agent: format!("webseek/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Production fetcher backed by reqwest
pub struct HttpFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency, if enabled
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl HttpFetcher {
    /// Create a new fetcher with default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(FetcherSettings::default())
    }

    /// Create a new fetcher with custom settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_settings(settings: FetcherSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(&settings.user_agent)
            .gzip(true)
            .build()?;

        let rate_limiter = settings
            .rate_limit
            .map(|rate| RateLimiter::direct(Quota::per_second(rate)));

        Ok(Self {
            client,
            rate_limiter,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // Wait for rate limiter before touching the network
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        tracing::debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let http_code = i32::from(response.status().as_u16());
        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(url = %url, http_code, bytes = body.len(), "page fetched");

        Ok(FetchedPage { http_code, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_creation() {
        assert!(HttpFetcher::new().is_ok());

        let settings = FetcherSettings {
            timeout: Duration::from_secs(5),
            rate_limit: NonZeroU32::new(10),
            user_agent: String::from("webseek-test"),
        };
        assert!(HttpFetcher::with_settings(settings).is_ok());
    }
}
