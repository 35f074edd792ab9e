//! Domain models
//!
//! `FeedSource` is the validated, runtime form of a configured source:
//! the size pattern is compiled once (case-insensitively) and the optional
//! bounds are resolved into a concrete range, so per-request work never
//! touches raw configuration strings.

use anyhow::{bail, Context, Result};
use regex::{Regex, RegexBuilder};
use url::Url;

use crate::config::SourceConfig;
use crate::feed::size_filter::SizeRange;

/// A named upstream feed with its compiled filter settings.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub name: String,
    pub feed_url: String,
    pub size_field: String,
    pub size_pattern: Regex,
    pub size_range: SizeRange,
}

impl FeedSource {
    /// Validate and compile one configured source.
    ///
    /// Fails when the feed URL does not parse, the size field is empty, the
    /// pattern is not a valid regex, or the pattern exposes fewer than two
    /// capture groups. These are configuration mistakes and should stop the
    /// process at startup rather than surface per request.
    pub fn from_config(name: &str, config: &SourceConfig) -> Result<Self> {
        Url::parse(&config.feed_url)
            .with_context(|| format!("invalid feed_url '{}'", config.feed_url))?;

        if config.size_field.is_empty() {
            bail!("size_field must not be empty");
        }

        let size_pattern = RegexBuilder::new(&config.size_pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("invalid size_pattern '{}'", config.size_pattern))?;

        // captures_len counts the implicit whole-match group 0.
        if size_pattern.captures_len() < 3 {
            bail!(
                "size_pattern '{}' must have at least two capture groups (magnitude, unit)",
                config.size_pattern
            );
        }

        Ok(Self {
            name: name.to_string(),
            feed_url: config.feed_url.clone(),
            size_field: config.size_field.clone(),
            size_pattern,
            size_range: SizeRange::new(config.min_size_mib, config.max_size_mib),
        })
    }
}
