//! Error type definitions for the RSS proxy application
//!
//! This module defines all error types used throughout the application.
//! `AppError` is the request-level taxonomy: every variant carries exactly
//! the message that is rendered to the caller, and the web layer maps each
//! variant to its HTTP status code. `FeedError` covers faults inside feed
//! parsing and reconstruction; the service layer translates it into the
//! appropriate `AppError` variant once the source name is known.

use thiserror::Error;

/// Convenience alias for request pipeline results
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type
///
/// Each variant corresponds to one failure mode of the `/rss` endpoint.
/// The `Display` output of a variant is the exact `error` string returned
/// to the client.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required query parameter was absent or empty
    #[error("Both 'source' and 'key' parameters are required")]
    MissingParameters,

    /// The supplied key does not match the configured shared secret
    #[error("Invalid key")]
    InvalidKey,

    /// The requested source is not present in the configuration
    #[error("Source '{name}' not found")]
    SourceNotFound { name: String },

    /// The upstream feed parsed but contained no items
    #[error("No items found in source '{name}'")]
    NoItems { name: String },

    /// The upstream responded with a non-200 status; mirrored back verbatim
    #[error("Failed to fetch data from source '{name}': {status}")]
    UpstreamStatus { name: String, status: u16 },

    /// Transport-level failure reaching the upstream (connect, timeout, read)
    #[error("HTTP request failed for source '{name}': {message}")]
    UpstreamRequest { name: String, message: String },

    /// The upstream body could not be parsed or restructured as a feed
    #[error("Failed to parse feed from source '{name}': {message}")]
    FeedParse { name: String, message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Feed parsing and reconstruction errors
#[derive(Error, Debug)]
pub enum FeedError {
    /// The document is not well-formed XML
    #[error("XML parse error: {0}")]
    Malformed(String),

    /// Element nesting exceeds the accepted maximum
    #[error("element nesting exceeds maximum of {0} levels")]
    TooDeep(usize),

    /// The document has no channel element to rebuild from
    #[error("feed has no channel element")]
    MissingChannel,

    /// The channel holds no item elements at any depth
    #[error("feed contains no items")]
    NoItems,

    /// Serialization of the rebuilt document failed
    #[error("XML write error: {0}")]
    Serialize(String),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a source not found error
    pub fn source_not_found<S: Into<String>>(source: S) -> Self {
        Self::SourceNotFound {
            name: source.into(),
        }
    }

    /// Create a no items error for a source
    pub fn no_items<S: Into<String>>(source: S) -> Self {
        Self::NoItems {
            name: source.into(),
        }
    }

    /// Create an upstream status passthrough error
    pub fn upstream_status<S: Into<String>>(source: S, status: u16) -> Self {
        Self::UpstreamStatus {
            name: source.into(),
            status,
        }
    }

    /// Create an upstream transport failure error
    pub fn upstream_request<S: Into<String>, M: Into<String>>(source: S, message: M) -> Self {
        Self::UpstreamRequest {
            name: source.into(),
            message: message.into(),
        }
    }

    /// Create a feed parse error
    pub fn feed_parse<S: Into<String>, M: Into<String>>(source: S, message: M) -> Self {
        Self::FeedParse {
            name: source.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
