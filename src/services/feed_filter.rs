//! Feed filter request pipeline
//!
//! One request = one linear pass: validate parameters, authorize, resolve
//! the source, fetch the upstream feed, parse it, rebuild the channel
//! around the size verdicts, serialize. No state is carried between
//! requests; the service is shared read-only behind an `Arc`.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{AppError, AppResult, FeedError};
use crate::feed::{document, filter_engine};
use crate::models::FeedSource;
use crate::sources::FeedFetcher;

#[derive(Debug)]
pub struct FeedFilterService {
    password: String,
    sources: HashMap<String, FeedSource>,
    fetcher: FeedFetcher,
}

impl FeedFilterService {
    /// Build the service from loaded configuration, compiling and
    /// validating every source. A misconfigured source fails startup
    /// instead of producing per-request errors later.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut sources = HashMap::new();
        for (name, source_config) in &config.sources {
            let source = FeedSource::from_config(name, source_config)
                .with_context(|| format!("invalid configuration for source '{}'", name))?;
            sources.insert(name.clone(), source);
        }

        info!("Compiled {} feed source(s)", sources.len());

        Ok(Self {
            password: config.auth.password.clone(),
            sources,
            fetcher: FeedFetcher::new(Duration::from_secs(config.upstream.timeout_seconds)),
        })
    }

    /// Handle one `/rss` request, returning the serialized filtered feed.
    ///
    /// The check order is fixed: parameter presence, then key, then source
    /// existence. A wrong key is reported as 403 even for unknown sources,
    /// so the key gate does not leak which source names exist.
    pub async fn handle(&self, source: Option<&str>, key: Option<&str>) -> AppResult<String> {
        let (Some(source), Some(key)) = (non_empty(source), non_empty(key)) else {
            return Err(AppError::MissingParameters);
        };

        if key != self.password {
            return Err(AppError::InvalidKey);
        }

        let feed_source = self
            .sources
            .get(source)
            .ok_or_else(|| AppError::source_not_found(source))?;

        info!(
            "Filtering feed for source '{}' from {}",
            source, feed_source.feed_url
        );

        let fetched = self
            .fetcher
            .fetch(&feed_source.feed_url)
            .await
            .map_err(|e| {
                warn!("Upstream request failed for source '{}': {}", source, e);
                AppError::upstream_request(source, e.to_string())
            })?;

        if fetched.status.as_u16() != 200 {
            warn!(
                "Upstream returned status {} for source '{}'",
                fetched.status, source
            );
            return Err(AppError::upstream_status(source, fetched.status.as_u16()));
        }

        let root = document::parse(&fetched.body)
            .map_err(|e| AppError::feed_parse(source, e.to_string()))?;

        let filtered = filter_engine::filter_feed(&root, feed_source).map_err(|e| match e {
            FeedError::NoItems => AppError::no_items(source),
            other => AppError::feed_parse(source, other.to_string()),
        })?;

        document::to_xml_string(&filtered).map_err(|e| AppError::internal(e.to_string()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
