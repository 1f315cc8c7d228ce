//! The entry type shared by every feed parser.
//!
//! Parsers convert their native items (RSS `<item>`, Atom `<entry>`) into
//! `FeedItem`s so that rendering never needs to know which format the feed
//! used.  Missing fields are filled in here, once, rather than at every call
//! site that displays an item.

/// Title shown for entries that have none.
pub const DEFAULT_TITLE: &str = "No Title";

/// A single feed entry, in the order the feed listed it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    /// Headline text.  Never empty-by-absence: see [`DEFAULT_TITLE`].
    pub title: String,

    /// Summary markup, inserted into the display document as-is.
    pub summary: String,

    /// URL of the full article, or empty if the entry had none.
    pub link: String,
}

impl FeedItem {
    /// Build an item from optional parts, applying the documented defaults.
    pub fn from_parts(title: Option<&str>, summary: Option<&str>, link: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            summary: summary.unwrap_or_default().to_string(),
            link: link.unwrap_or_default().to_string(),
        }
    }
}
