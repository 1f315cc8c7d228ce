//! Background feed fetching.
//!
//! [`Fetcher::dispatch`] spawns one task per [`FetchJob`] on the tokio
//! runtime.  The task waits out the display delay, runs the parser, folds the
//! result into a [`FetchOutcome`], and sends it to the UI thread over an
//! [`mpsc`] channel that the main loop drains on every tick.
//!
//! The fetch state in [`App`](crate::app::App) guarantees at most one job is
//! in flight; nothing here needs to coordinate.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, Instrument};

use crate::app::{FetchJob, FetchOutcome};
use crate::source::FeedParser;

/// Sent from a fetch task to the UI thread when it finishes.
#[derive(Debug)]
pub struct FetchDone {
    pub source: &'static str,
    pub outcome: FetchOutcome,
}

pub struct Fetcher {
    handle: Handle,
    parser: Arc<dyn FeedParser>,
    delay: Duration,
    tx: mpsc::Sender<FetchDone>,
}

impl Fetcher {
    /// Create a fetcher that runs jobs on `handle`.
    ///
    /// Returns the receiver the main loop should drain.
    pub fn new(
        handle: Handle,
        parser: Arc<dyn FeedParser>,
        delay: Duration,
    ) -> (Self, mpsc::Receiver<FetchDone>) {
        let (tx, rx) = mpsc::channel();
        let fetcher = Self {
            handle,
            parser,
            delay,
            tx,
        };
        (fetcher, rx)
    }

    /// Run `job` in the background.
    pub fn dispatch(&self, job: FetchJob) {
        let parser = Arc::clone(&self.parser);
        let tx = self.tx.clone();
        let delay = self.delay;
        let span = tracing::info_span!("fetch", source = job.source);

        self.handle.spawn(
            async move {
                // Lets the "fetching" state register before results replace it.
                tokio::time::sleep(delay).await;

                let outcome = FetchOutcome::classify(parser.parse(job.url).await);
                debug!(?outcome, "fetch finished");

                // If the receiver is gone the UI has exited; drop the result.
                let _ = tx.send(FetchDone {
                    source: job.source,
                    outcome,
                });
            }
            .instrument(span),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::runtime::Runtime;

    use crate::error::FeedError;
    use crate::source::FeedItem;

    /// Returns a canned result and records the URLs it was asked for.
    struct StubParser {
        result: fn() -> Result<Vec<FeedItem>, FeedError>,
        urls: Mutex<Vec<String>>,
    }

    impl StubParser {
        fn new(result: fn() -> Result<Vec<FeedItem>, FeedError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl FeedParser for StubParser {
        async fn parse(&self, url: &str) -> Result<Vec<FeedItem>, FeedError> {
            self.urls.lock().unwrap().push(url.to_string());
            (self.result)()
        }
    }

    fn job() -> FetchJob {
        FetchJob {
            source: "Kathmandu Post",
            url: "https://kathmandupost.com/rss",
        }
    }

    fn run(
        result: fn() -> Result<Vec<FeedItem>, FeedError>,
        delay: Duration,
    ) -> (FetchDone, Arc<StubParser>) {
        let rt = Runtime::new().unwrap();
        let parser = StubParser::new(result);
        let (fetcher, rx) = Fetcher::new(rt.handle().clone(), parser.clone(), delay);
        fetcher.dispatch(job());
        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        (done, parser)
    }

    #[test]
    fn success_is_sent_back_with_source() {
        let (done, parser) = run(
            || Ok(vec![FeedItem::from_parts(Some("A"), Some("S"), Some("L"))]),
            Duration::ZERO,
        );

        assert_eq!(done.source, "Kathmandu Post");
        assert_eq!(
            done.outcome,
            FetchOutcome::Success(vec![FeedItem::from_parts(Some("A"), Some("S"), Some("L"))])
        );
        assert_eq!(*parser.urls.lock().unwrap(), ["https://kathmandupost.com/rss"]);
    }

    #[test]
    fn parser_error_becomes_parse_failure() {
        let (done, _) = run(|| Err(FeedError::Parse("nope".into())), Duration::ZERO);
        assert_eq!(done.outcome, FetchOutcome::ParseFailure);
    }

    #[test]
    fn empty_feed_becomes_empty() {
        let (done, _) = run(|| Ok(vec![]), Duration::ZERO);
        assert_eq!(done.outcome, FetchOutcome::Empty);
    }

    #[test]
    fn result_arrives_after_the_delay() {
        let rt = Runtime::new().unwrap();
        let (fetcher, rx) = Fetcher::new(
            rt.handle().clone(),
            StubParser::new(|| Ok(vec![])),
            Duration::from_millis(300),
        );
        fetcher.dispatch(job());

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
