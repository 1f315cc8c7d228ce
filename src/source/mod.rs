//! Feed sources and parsing.
//!
//! This module defines the [`FeedParser`] trait, the common [`FeedItem`]
//! type, and the fixed [`Registry`] of news sources.  The production parser
//! lives in [`http`].
//!
//! ## For contributors: adding a source
//!
//! New news sites only need a row in [`registry::NEWS_SOURCES`].  A new feed
//! *format* means teaching [`HttpFeedParser`] to recognise it; the workflow,
//! rendering, and UI are all format-agnostic.

mod feed_item;
mod http;
pub mod registry;

// Re-export the public API of this module so callers can write
// `use crate::source::{FeedItem, FeedParser, Registry};`
pub use feed_item::FeedItem;
pub use http::HttpFeedParser;
pub use registry::Registry;

use async_trait::async_trait;

use crate::error::FeedError;

/// Anything that can turn a feed URL into an ordered list of entries.
///
/// The fetch task calls [`parse()`](FeedParser::parse) from the tokio
/// runtime, so implementations must be [`Send`] + [`Sync`].
///
/// `Ok(vec![])` means the document was a well-formed feed with no entries.
/// Any `Err` (unreachable host, timeout, bad status, malformed XML) means the
/// document could not be read as a feed.
#[async_trait]
pub trait FeedParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<Vec<FeedItem>, FeedError>;
}
