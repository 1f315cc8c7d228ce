//! Error types.
//!
//! [`AppError`] covers requests the workflow refuses to start.  [`FeedError`]
//! covers everything that can go wrong while fetching a feed; the workflow
//! folds all of it into a single "could not parse" outcome for the user, but
//! the detail is kept here so it can be logged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown news source: {0}")]
    UnknownSource(String),

    #[error("No news source selected")]
    NoSelection,

    #[error("A fetch is already in progress")]
    FetchInProgress,
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    Parse(String),
}
