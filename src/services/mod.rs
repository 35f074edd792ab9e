//! Service layer

pub mod feed_filter;

pub use feed_filter::FeedFilterService;
