//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [attempting] notification="7f3a…" channel=email attempt=1
//! [attempt-failed] notification="7f3a…" attempt=1 err="gateway failure: …"
//! [retry-scheduled] notification="7f3a…" delay_ms=1000 after_attempt=1 err="…"
//! [delivered] notification="7f3a…" attempt=2
//! [retries-exhausted] notification="7f3a…" attempts=3 err="…"
//! [canceled] notification="7f3a…"
//! [submission-dropped] notification="7f3a…"
//! [shutdown-requested]
//! [drained-within-grace]
//! [grace-exceeded]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::AttemptStarting => {
                println!(
                    "[attempting] notification={:?} channel={} attempt={:?}",
                    e.notification,
                    e.channel.map(|c| c.as_str()).unwrap_or("?"),
                    e.attempt
                );
            }
            EventKind::AttemptFailed => {
                println!(
                    "[attempt-failed] notification={:?} attempt={:?} err={:?}",
                    e.notification, e.attempt, e.reason
                );
            }
            EventKind::RetryScheduled => {
                println!(
                    "[retry-scheduled] notification={:?} delay_ms={:?} after_attempt={:?} err={:?}",
                    e.notification, e.delay_ms, e.attempt, e.reason
                );
            }
            EventKind::Delivered => {
                println!(
                    "[delivered] notification={:?} attempt={:?}",
                    e.notification, e.attempt
                );
            }
            EventKind::RetriesExhausted => {
                println!(
                    "[retries-exhausted] notification={:?} attempts={:?} err={:?}",
                    e.notification, e.attempt, e.reason
                );
            }
            EventKind::DeliveryCanceled => {
                println!("[canceled] notification={:?}", e.notification);
            }
            EventKind::SubmissionDropped => {
                println!("[submission-dropped] notification={:?}", e.notification);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::DrainedWithinGrace => {
                println!("[drained-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
