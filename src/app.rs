//! Application state and the fetch workflow.
//!
//! A fetch is two explicit phases:
//!
//! 1. [`App::begin_fetch`]: synchronous.  Guards against a second fetch,
//!    resolves the source, flips to [`FetchState::Fetching`], and shows the
//!    "fetching" placeholder.  Returns a [`FetchJob`] for the background task.
//! 2. [`App::complete_fetch`]: called with the task's [`FetchOutcome`].
//!    Renders the outcome and always returns to [`FetchState::Idle`].
//!
//! Nothing here touches the network, so every transition is testable without
//! a terminal or a runtime.

use std::time::{Duration, Instant};

use ratatui::{text::Text, widgets::ListState};
use tracing::{info, warn};

use crate::error::{AppError, FeedError};
use crate::markup;
use crate::render;
use crate::source::{FeedItem, Registry};
use crate::status::StatusLine;

pub const WELCOME_TEXT: &str = "Select a news source and click 'Fetch News' to see headlines.";
pub const PARSE_FAILURE_TEXT: &str =
    "⚠️ Failed to parse the feed. It may be unavailable or malformed.";
pub const EMPTY_FEED_TEXT: &str = "ℹ️ No news items found in the selected feed.";

const READY_STATUS: &str = "Ready.";
const PARSE_FAILURE_STATUS: &str = "❌ Error fetching the news.";
const EMPTY_FEED_STATUS: &str = "No news found.";
const SUCCESS_STATUS: &str = "✅ News fetched successfully!";

const SHORT_STATUS: Duration = Duration::from_secs(3);
const LONG_STATUS: Duration = Duration::from_secs(5);

/// Whether a new fetch may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
}

/// What a fetch attempt came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The document could not be read as a feed, for whatever reason.
    ParseFailure,
    /// A well-formed feed with no entries.
    Empty,
    /// Entries in document order.
    Success(Vec<FeedItem>),
}

impl FetchOutcome {
    /// Fold a parser result into one of the three outcomes.
    pub fn classify(result: Result<Vec<FeedItem>, FeedError>) -> Self {
        match result {
            Err(e) => {
                warn!(error = %e, "feed fetch failed");
                Self::ParseFailure
            }
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Success(items),
        }
    }
}

/// A resolved fetch request, handed to the background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub source: &'static str,
    pub url: &'static str,
}

/// What the content pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Dimmed hint text shown while there is nothing else.
    Placeholder(String),
    /// A single warning or informational message.
    Message(String),
    /// The HTML document built from fetched entries.
    Document(String),
}

pub struct App {
    pub registry: Registry,
    /// Selection in the source list.
    pub list_state: ListState,
    pub state: FetchState,
    content: Content,
    /// `content` converted for display; kept so it is parsed once, not per frame.
    view: Text<'static>,
    /// Links of the displayed entries, in display order.
    links: Vec<String>,
    /// Vertical scroll offset of the content pane.
    pub scroll: u16,
    pub status: StatusLine,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new(registry: Registry) -> Self {
        let mut list_state = ListState::default();
        if !registry.is_empty() {
            list_state.select(Some(0));
        }
        let mut status = StatusLine::default();
        status.show(READY_STATUS, SHORT_STATUS);

        let mut app = Self {
            registry,
            list_state,
            state: FetchState::Idle,
            content: Content::Placeholder(String::new()),
            view: Text::default(),
            links: Vec::new(),
            scroll: 0,
            status,
            quit: false,
        };
        app.set_content(Content::Placeholder(WELCOME_TEXT.into()));
        app
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn view(&self) -> &Text<'static> {
        &self.view
    }

    pub fn is_fetching(&self) -> bool {
        self.state == FetchState::Fetching
    }

    /// Link of the `n`th displayed entry (0-based), if it has one.
    pub fn link(&self, n: usize) -> Option<&str> {
        self.links.get(n).map(String::as_str).filter(|l| !l.is_empty())
    }

    pub fn selected_source(&self) -> Option<&'static str> {
        self.list_state
            .selected()
            .and_then(|i| self.registry.get(i))
            .map(|e| e.name)
    }

    fn set_content(&mut self, content: Content) {
        let view = match &content {
            Content::Placeholder(text) | Content::Message(text) => Text::from(text.clone()),
            Content::Document(html) => markup::to_text(html),
        };
        self.show(content, view);
    }

    fn show(&mut self, content: Content, view: Text<'static>) {
        self.content = content;
        self.view = view;
        self.scroll = 0;
    }

    // -- workflow ------------------------------------------------------------

    /// Start a fetch for the source selected in the list.
    pub fn request_fetch(&mut self) -> Result<FetchJob, AppError> {
        let source = self
            .selected_source()
            .ok_or(AppError::NoSelection)?;
        self.begin_fetch(source)
    }

    /// Phase one: move to [`FetchState::Fetching`] and show the placeholder.
    pub fn begin_fetch(&mut self, source: &str) -> Result<FetchJob, AppError> {
        if self.is_fetching() {
            return Err(AppError::FetchInProgress);
        }
        let entry = self.registry.lookup(source)?;
        let (source, url) = (entry.name, entry.url);

        info!(source, url, "fetch requested");
        self.state = FetchState::Fetching;
        self.status
            .show(format!("Fetching news from {source}..."), Duration::ZERO);
        self.links.clear();
        self.set_content(Content::Placeholder(format!(
            "Fetching news from {source}...\nPlease wait."
        )));

        Ok(FetchJob { source, url })
    }

    /// Phase two: show the outcome and return to [`FetchState::Idle`].
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::ParseFailure => {
                self.set_content(Content::Message(PARSE_FAILURE_TEXT.into()));
                self.status.show(PARSE_FAILURE_STATUS, LONG_STATUS);
            }
            FetchOutcome::Empty => {
                self.set_content(Content::Message(EMPTY_FEED_TEXT.into()));
                self.status.show(EMPTY_FEED_STATUS, LONG_STATUS);
            }
            FetchOutcome::Success(items) => {
                info!(entries = items.len(), "feed fetched");
                let shown = render::displayed(&items);
                self.links = shown.iter().map(|i| i.link.clone()).collect();
                // Convert block by block so broken markup in one summary
                // only costs that entry its styling.
                let lines: Vec<_> = shown
                    .iter()
                    .flat_map(|i| markup::to_text(&render::render_block(i)).lines)
                    .collect();
                self.show(
                    Content::Document(render::render_document(&items)),
                    Text::from(lines),
                );
                self.status.show(SUCCESS_STATUS, SHORT_STATUS);
            }
        }
        self.state = FetchState::Idle;
    }

    /// Expire the status line.
    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);
    }

    // -- source selection ----------------------------------------------------

    pub fn select_next(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.registry.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    // -- content scrolling ---------------------------------------------------

    // Offsets are in wrapped rows.  Only the UI knows the pane size, so the
    // upper bound is applied by `clamp_scroll` when the pane is drawn.

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll = u16::MAX;
    }

    /// Keep the last page of `rows` wrapped rows reachable in a pane `height` rows tall.
    pub fn clamp_scroll(&mut self, rows: usize, height: u16) {
        let max = rows.saturating_sub(usize::from(height));
        self.scroll = self.scroll.min(u16::try_from(max).unwrap_or(u16::MAX));
    }
}
