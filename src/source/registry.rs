//! The fixed table of news sources.
//!
//! Sources are compiled in and never change at runtime.  The selector in the
//! UI is populated from [`Registry::names`], so every name the user can pick
//! resolves; [`Registry::resolve`] still reports unknown names instead of
//! panicking.

use crate::error::AppError;

/// A named feed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: &'static str,
    pub url: &'static str,
}

/// The built-in sources, in display order.
pub const NEWS_SOURCES: &[SourceEntry] = &[
    SourceEntry {
        name: "BBC News",
        url: "http://feeds.bbci.co.uk/news/rss.xml",
    },
    SourceEntry {
        name: "CNN",
        url: "http://rss.cnn.com/rss/edition.rss",
    },
    SourceEntry {
        name: "Al Jazeera",
        url: "http://www.aljazeera.com/xml/rss/all.xml",
    },
    SourceEntry {
        name: "The Guardian",
        url: "https://www.theguardian.com/international/rss",
    },
    SourceEntry {
        name: "Kathmandu Post",
        url: "https://kathmandupost.com/rss",
    },
];

/// Read-only view over an ordered table of [`SourceEntry`] values.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    entries: &'static [SourceEntry],
}

impl Registry {
    pub const fn new(entries: &'static [SourceEntry]) -> Self {
        Self { entries }
    }

    /// The registry backed by [`NEWS_SOURCES`].
    pub const fn builtin() -> Self {
        Self::new(NEWS_SOURCES)
    }

    pub fn entries(&self) -> &'static [SourceEntry] {
        self.entries
    }

    /// Source names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.name)
    }

    pub fn get(&self, index: usize) -> Option<&'static SourceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry called `name`.
    pub fn lookup(&self, name: &str) -> Result<&'static SourceEntry, AppError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| AppError::UnknownSource(name.to_string()))
    }

    /// Look up the feed URL for `name`.
    pub fn resolve(&self, name: &str) -> Result<&'static str, AppError> {
        self.lookup(name).map(|e| e.url)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
