//! # In-flight delivery tracker with sequence-based ordering.
//!
//! Maintains authoritative state of which notifications are currently being
//! delivered, using event sequence numbers to handle out-of-order delivery.
//!
//! ## Architecture
//! ```text
//! Workers ──► Bus ──► subscriber listener ──► InflightTracker::on_event()
//!                                                    │
//!                                                    ▼
//!                                      HashMap<String, DeliveryState>
//!                                          (id → {seq, inflight})
//! ```
//!
//! ## Rules
//! - `AttemptStarting` marks a notification in flight; terminal events
//!   (`Delivered` / `RetriesExhausted` / `DeliveryCanceled`) clear it
//! - Read operations (`snapshot`, `is_inflight`) are **eventually consistent**
//! - Other events **update seq** but don't affect in-flight status
//! - Events with `seq <= last_seq` are **rejected** (stale)

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Per-notification state for ordering validation.
#[derive(Debug, Clone)]
struct DeliveryState {
    /// Last seen sequence number for this notification.
    last_seq: u64,
    /// Current status (true = in flight, false = finished).
    inflight: bool,
}

/// Thread-safe tracker of in-flight deliveries.
///
/// ### Responsibilities
/// - Provides snapshots for graceful drain (stuck delivery detection)
/// - Maintains authoritative state of which notifications are in flight
/// - Rejects stale events using sequence numbers
pub struct InflightTracker {
    state: RwLock<HashMap<String, DeliveryState>>,
}

impl InflightTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Updates delivery state if the event is newer than the last seen.
    ///
    /// ### Ordering guarantees
    /// Events are applied only if `ev.seq > last_seq` for this notification,
    /// so stale events cannot resurrect a finished delivery:
    /// ```text
    /// update(Delivered, seq=100)       → inflight=false, last_seq=100
    /// update(AttemptStarting, seq=99)  → rejected (stale)
    /// ```
    async fn update(&self, ev: &Event) -> bool {
        let id = match ev.notification.as_deref() {
            Some(id) => id,
            None => return false,
        };

        let mut state = self.state.write().await;
        let entry = state.entry(id.to_string()).or_insert(DeliveryState {
            last_seq: 0,
            inflight: false,
        });

        if ev.seq <= entry.last_seq {
            return false;
        }
        match ev.kind {
            EventKind::AttemptStarting => {
                entry.last_seq = ev.seq;
                entry.inflight = true;
                true
            }
            EventKind::Delivered | EventKind::RetriesExhausted | EventKind::DeliveryCanceled => {
                entry.last_seq = ev.seq;
                entry.inflight = false;
                true
            }
            _ => {
                entry.last_seq = ev.seq;
                false
            }
        }
    }

    /// Returns the sorted ids of deliveries currently in flight.
    ///
    /// Used by [`DispatchPool`](crate::DispatchPool) to report stuck
    /// deliveries when the drain grace period expires.
    pub async fn snapshot(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut inflight: Vec<String> = state
            .iter()
            .filter(|(_, ds)| ds.inflight)
            .map(|(id, _)| id.clone())
            .collect();
        inflight.sort_unstable();
        inflight
    }

    /// Returns true if the notification is currently in flight.
    pub async fn is_inflight(&self, id: &str) -> bool {
        self.state
            .read()
            .await
            .get(id)
            .map(|ds| ds.inflight)
            .unwrap_or(false)
    }
}

impl Default for InflightTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for InflightTracker {
    async fn on_event(&self, event: &Event) {
        self.update(event).await;
    }

    fn name(&self) -> &'static str {
        "inflight-tracker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_attempt_marks_inflight_and_terminal_clears() {
        let tracker = InflightTracker::new();

        tracker
            .update(&Event::new(EventKind::AttemptStarting).with_notification("n-1"))
            .await;
        assert!(tracker.is_inflight("n-1").await);

        tracker
            .update(&Event::new(EventKind::Delivered).with_notification("n-1"))
            .await;
        assert!(!tracker.is_inflight("n-1").await);
    }

    #[tokio::test]
    async fn test_stale_events_are_rejected() {
        let tracker = InflightTracker::new();

        let starting = Event::new(EventKind::AttemptStarting).with_notification("n-2");
        let finished = Event::new(EventKind::RetriesExhausted).with_notification("n-2");

        // Apply out of order: the newer terminal event wins.
        tracker.update(&finished).await;
        assert!(!tracker.update(&starting).await);
        assert!(!tracker.is_inflight("n-2").await);
    }

    #[tokio::test]
    async fn test_snapshot_lists_only_inflight_ids() {
        let tracker = InflightTracker::new();

        tracker
            .update(&Event::new(EventKind::AttemptStarting).with_notification("b"))
            .await;
        tracker
            .update(&Event::new(EventKind::AttemptStarting).with_notification("a"))
            .await;
        tracker
            .update(&Event::new(EventKind::DeliveryCanceled).with_notification("b"))
            .await;

        assert_eq!(tracker.snapshot().await, vec!["a".to_string()]);
    }
}
