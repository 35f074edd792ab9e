//! Outbound feed fetching
//!
//! Thin wrapper around a shared `reqwest` client. The client carries a
//! bounded timeout covering the whole request including the body read;
//! upstreams that hang cannot pin a request slot indefinitely.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// A fetched upstream response: status plus the full body text.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client for upstream feeds.
#[derive(Debug)]
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rss-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch a feed URL, returning the status and body. Transport-level
    /// failures (connect, timeout, body read) surface as `reqwest::Error`;
    /// non-200 statuses are returned to the caller for its own handling.
    pub async fn fetch(&self, url: &str) -> Result<FetchedFeed, reqwest::Error> {
        debug!("Fetching feed from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Fetched {} bytes with status {}", body.len(), status);
        Ok(FetchedFeed { status, body })
    }
}
