//! Async page fetcher wrapping reqwest.
//!
//! Not a browser — one GET per invocation, redirects followed, no
//! retries and no caching. A failed fetch fails the whole extraction
//! pass for that source.

use crate::error::TrackerError;
use std::time::Duration;

/// Per-fetch timeout for a bulletin page.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum redirects followed before giving up.
const MAX_REDIRECTS: usize = 5;

/// HTTP client for bulletin pages.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher with the standard timeout, redirect bound, and
    /// a browser user-agent.
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout (tests shrink it).
    pub fn with_timeout(timeout: Duration) -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET a bulletin page and return the raw markup.
    pub async fn fetch(&self, url: &str) -> Result<String, TrackerError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrackerError::FetchFailure {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| map_reqwest_error(url, e))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Timeouts keep their own variant; everything else is a fetch failure,
/// with status 0 when no response was received.
fn map_reqwest_error(url: &str, e: reqwest::Error) -> TrackerError {
    if e.is_timeout() {
        TrackerError::Timeout(url.to_string())
    } else {
        TrackerError::FetchFailure {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
        }
    }
}
