//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent
//! - Single GET requests with a fixed timeout
//! - UTF-8 decoding of response bodies
//! - Error classification

use crate::config::CrawlerConfig;
use crate::crawler::events::{CrawlEvent, EventSink};
use crate::{FetchCause, FetchError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages and reports every attempt to an event sink
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
    sink: Arc<dyn EventSink>,
}

impl PageFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client, timeout: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self {
            client,
            timeout,
            sink,
        }
    }

    /// Creates a fetcher with a client built from the crawler configuration
    pub fn from_config(
        config: &CrawlerConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::new(
            client,
            Duration::from_secs(config.timeout_secs),
            sink,
        ))
    }

    /// Fetches `url` and returns its body decoded as UTF-8
    ///
    /// Emits exactly one event per call, `Fetched` or `FetchFailed`.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let result = fetch_url(&self.client, url, self.timeout).await;

        match &result {
            Ok(body) => self.sink.emit(CrawlEvent::Fetched {
                url: url.to_string(),
                bytes: body.len(),
            }),
            Err(error) => self.sink.emit(CrawlEvent::FetchFailed {
                url: url.to_string(),
                error: error.cause.to_string(),
            }),
        }

        result
    }
}

/// Issues a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | body, decoded as UTF-8 whatever the declared charset |
/// | Other status | `FetchCause::Status` |
/// | Timeout | `FetchCause::Timeout` |
/// | Connection refused / DNS | `FetchCause::Connect` |
/// | Body read failure | `FetchCause::Body` |
///
/// Nothing is retried.
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> Result<String, FetchError> {
    let failure = |cause: FetchCause| FetchError {
        url: url.to_string(),
        cause,
    };

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| failure(classify_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(failure(FetchCause::Status(status.as_u16())));
    }

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            failure(FetchCause::Timeout)
        } else {
            failure(FetchCause::Body(e.to_string()))
        }
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Maps a transport error to a fetch cause
fn classify_error(error: &reqwest::Error) -> FetchCause {
    if error.is_timeout() {
        FetchCause::Timeout
    } else if error.is_connect() {
        FetchCause::Connect
    } else if let Some(status) = error.status() {
        FetchCause::Status(status.as_u16())
    } else {
        FetchCause::Request(error.to_string())
    }
}
