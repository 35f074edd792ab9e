//! Channel reconstruction
//!
//! Rebuilds an upstream feed around the size verdicts: channel metadata is
//! copied as-is, items are kept only when their extracted size falls inside
//! the source's bounds.

use crate::errors::FeedError;
use crate::feed::document::{XmlElement, XmlNode};
use crate::feed::size_filter::parse_size_mib;
use crate::models::FeedSource;

/// Rebuild a fetched feed, keeping only the items whose size qualifies.
///
/// The metadata copy is shallow: every direct child of the original channel
/// that is not an `item` is carried over in order, its subtree untouched.
/// Item collection is deep: `item` elements are gathered from any depth
/// under the channel. The asymmetry is intentional and load-bearing for
/// feeds that nest items inside wrapper elements.
///
/// Items are dropped silently when the configured field is missing, its
/// text is empty, the size cannot be extracted, or the size is out of
/// range. Kept items appear in their original relative order after the
/// metadata, inside a fresh `<rss version="2.0">` wrapper.
pub fn filter_feed(root: &XmlElement, source: &FeedSource) -> Result<XmlElement, FeedError> {
    let channel = root
        .first_child("channel")
        .ok_or(FeedError::MissingChannel)?;

    let mut new_channel = XmlElement::new("channel");
    for child in channel.child_elements() {
        if child.name != "item" {
            new_channel.children.push(XmlNode::Element(child.clone()));
        }
    }

    let items = channel.descendants_named("item");
    if items.is_empty() {
        return Err(FeedError::NoItems);
    }

    for item in items {
        let Some(field) = item.first_child(&source.size_field) else {
            continue;
        };
        let text = field.direct_text();
        if text.is_empty() {
            continue;
        }
        let Some(size_mib) = parse_size_mib(&text, &source.size_pattern) else {
            continue;
        };
        if source.size_range.contains(size_mib) {
            new_channel.children.push(XmlNode::Element(item.clone()));
        }
    }

    let mut rss = XmlElement::new("rss");
    rss.attributes
        .push(("version".to_string(), "2.0".to_string()));
    rss.children.push(XmlNode::Element(new_channel));
    Ok(rss)
}
