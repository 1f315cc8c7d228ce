//! HTTP feed parser.
//!
//! Downloads a feed with [`reqwest`] and parses it as RSS 2.0 using the
//! [`rss`] crate.  Documents that are not RSS get a second chance through
//! [`feed_rs`], which understands Atom (and RSS 0.9/1.0).
//!
//! Entries come back in document order; nothing here sorts or truncates.

use std::time::Duration;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use tracing::debug;

use super::{FeedItem, FeedParser};
use crate::error::FeedError;

/// Fetches feeds over HTTP with a bounded request time.
pub struct HttpFeedParser {
    client: reqwest::Client,
}

impl HttpFeedParser {
    /// Create a parser whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Parse an already-downloaded feed document.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// parsing logic without hitting the network.
    pub fn parse_document(body: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
        match rss::Channel::read_from(body) {
            Ok(channel) => Ok(Self::items_from_channel(&channel)),
            Err(rss_err) => {
                debug!(error = %rss_err, "not an RSS channel, trying Atom");
                let feed = feed_rs::parser::parse(body)
                    .map_err(|e| FeedError::Parse(format!("{rss_err}; {e}")))?;
                Ok(Self::items_from_feed(feed))
            }
        }
    }

    fn items_from_channel(channel: &rss::Channel) -> Vec<FeedItem> {
        channel
            .items()
            .iter()
            .map(|item| FeedItem::from_parts(item.title(), item.description(), item.link()))
            .collect()
    }

    fn items_from_feed(feed: feed_rs::model::Feed) -> Vec<FeedItem> {
        feed.entries
            .into_iter()
            .map(|entry| {
                // feed-rs unescapes plain-text titles itself; only HTML ones
                // still carry entities.
                let title = entry.title.map(|t| {
                    if t.content_type.essence().to_string() == "text/html" {
                        decode_html_entities(&t.content).into_owned()
                    } else {
                        t.content
                    }
                });
                // Atom entries often carry only <content>; use it as the summary.
                let summary = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body));
                let link = entry.links.first().map(|l| l.href.clone());

                FeedItem::from_parts(title.as_deref(), summary.as_deref(), link.as_deref())
            })
            .collect()
    }
}

#[async_trait]
impl FeedParser for HttpFeedParser {
    async fn parse(&self, url: &str) -> Result<Vec<FeedItem>, FeedError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(url, bytes = body.len(), "downloaded feed");
        Self::parse_document(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
