//! # Delivery lifecycle events.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Attempt events**: one delivery attempt's flow (starting, failed,
//!   retry scheduled, delivered)
//! - **Terminal events**: one notification's final state (retries exhausted,
//!   canceled by shutdown, dropped at submission)
//! - **Pool events**: shutdown and drain outcomes
//!
//! The [`Event`] struct carries the metadata sinks need to report delivery
//! outcomes: notification identity, channel, attempt count, retry delay and
//! failure reason, plus timestamps.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order (e.g. across subscriber queues).
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use notivisor::{Channel, Event, EventKind};
//!
//! let ev = Event::new(EventKind::RetryScheduled)
//!     .with_notification("d4c0ffee")
//!     .with_channel(Channel::Sms)
//!     .with_attempt(1)
//!     .with_delay(Duration::from_millis(1000))
//!     .with_reason("gateway failure: line busy");
//!
//! assert_eq!(ev.kind, EventKind::RetryScheduled);
//! assert_eq!(ev.attempt, Some(1));
//! assert_eq!(ev.delay_ms, Some(1000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::notifications::Channel;

/// Global sequence counter for event ordering. Starts at 1 so that 0 can
/// serve as the "nothing seen yet" sentinel in sequence-guarded consumers.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of delivery lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt events ===
    /// A delivery attempt is starting.
    ///
    /// Sets:
    /// - `notification`: notification id
    /// - `channel`: delivery channel
    /// - `attempt`: attempt number (1-based)
    AttemptStarting,

    /// One delivery attempt failed; the retry loop decides what happens next.
    ///
    /// Sets:
    /// - `notification`: notification id
    /// - `attempt`: attempt number
    /// - `reason`: failure message
    AttemptFailed,

    /// A retry was scheduled after a failed attempt.
    ///
    /// Sets:
    /// - `notification`: notification id
    /// - `attempt`: the attempt that just failed
    /// - `delay_ms`: fixed pause before the next attempt
    /// - `reason`: last failure message
    RetryScheduled,

    /// The notification was delivered.
    ///
    /// Sets:
    /// - `notification`: notification id
    /// - `attempt`: the attempt that succeeded
    Delivered,

    // === Terminal failure events ===
    /// Every attempt up to the configured maximum failed; the notification
    /// is discarded.
    ///
    /// Sets:
    /// - `notification`: notification id
    /// - `attempt`: total attempts made
    /// - `reason`: last failure message
    RetriesExhausted,

    /// Shutdown was observed mid-delivery; remaining retries were abandoned.
    ///
    /// Sets:
    /// - `notification`: notification id
    DeliveryCanceled,

    /// A submission arrived after shutdown and was dropped without dispatch.
    ///
    /// Sets:
    /// - `notification`: notification id
    SubmissionDropped,

    // === Pool events ===
    /// Shutdown requested; no new attempts will start once observed.
    ShutdownRequested,

    /// All in-flight deliveries finished within the drain grace period.
    DrainedWithinGrace,

    /// Drain grace period expired with deliveries still in flight.
    GraceExceeded,
}

/// Delivery lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the notification, if applicable.
    pub notification: Option<Arc<str>>,
    /// Delivery channel, if applicable.
    pub channel: Option<Channel>,
    /// Attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Retry delay before the next attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (failure messages etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and
    /// next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            notification: None,
            channel: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a notification id.
    #[inline]
    pub fn with_notification(mut self, id: impl Into<Arc<str>>) -> Self {
        self.notification = Some(id.into());
        self
    }

    /// Attaches a delivery channel.
    #[inline]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a retry delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True if this event ends the notification's lifecycle.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Delivered
                | EventKind::RetriesExhausted
                | EventKind::DeliveryCanceled
                | EventKind::SubmissionDropped
        )
    }
}
