//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the pooled HTTP client with user agent and timeout
//! - GET requests returning the page body as text
//! - Error classification (timeout, connection, status, other)
//!
//! There is no retry logic; a failed fetch is reported to the caller once.

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Upper bound on the time spent establishing a connection
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds an HTTP client with proper configuration
///
/// The client keeps a connection pool, so one client should be reused for a
/// whole run.
///
/// # Example
///
/// ```no_run
/// use shelf_scrape::config::HttpConfig;
/// use shelf_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.timeout();

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Non-2xx status | [`FetchError::Status`] |
/// | Timeout | [`FetchError::Timeout`] |
/// | Connection refused / unreachable | [`FetchError::Connect`] |
/// | Anything else (TLS, body decoding, ...) | [`FetchError::Network`] |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
