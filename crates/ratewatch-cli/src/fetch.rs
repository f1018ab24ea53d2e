//! HTTP transport for hotel pages.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Fetches hotel pages as text with a fixed timeout and `User-Agent`.
pub(crate) struct PageClient {
    client: Client,
}

impl PageClient {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub(crate) fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RateLimited`] on HTTP 429.
    /// - [`FetchError::NotFound`] on HTTP 404.
    /// - [`FetchError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`FetchError::Http`] on network, TLS, or timeout failure.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(FetchError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
