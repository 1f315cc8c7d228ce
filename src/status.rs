//! The transient status line.
//!
//! A message is shown either until the next message replaces it, or until a
//! fixed duration has passed, after which the line goes blank.

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct StatusLine {
    text: String,
    expires_at: Option<Instant>,
}

impl StatusLine {
    /// Show `text`.  A zero `duration` keeps it until the next message.
    pub fn show(&mut self, text: impl Into<String>, duration: Duration) {
        self.show_at(text, duration, Instant::now());
    }

    fn show_at(&mut self, text: impl Into<String>, duration: Duration, now: Instant) {
        self.text = text.into();
        self.expires_at = (!duration.is_zero()).then(|| now + duration);
    }

    /// Clear the message if its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.expires_at.is_some_and(|at| now >= at) {
            self.text.clear();
            self.expires_at = None;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_message_clears_after_duration() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.show_at("done", Duration::from_secs(3), start);

        status.tick(start + Duration::from_secs(2));
        assert_eq!(status.text(), "done");

        status.tick(start + Duration::from_secs(3));
        assert_eq!(status.text(), "");
        assert!(status.expires_at().is_none());
    }

    #[test]
    fn zero_duration_never_expires() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.show_at("working", Duration::ZERO, start);

        status.tick(start + Duration::from_secs(3600));
        assert_eq!(status.text(), "working");
    }

    #[test]
    fn new_message_replaces_old_expiry() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.show_at("first", Duration::from_secs(1), start);
        status.show_at("second", Duration::ZERO, start);

        status.tick(start + Duration::from_secs(5));
        assert_eq!(status.text(), "second");
    }
}
