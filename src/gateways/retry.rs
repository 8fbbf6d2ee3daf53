//! # Retry: bounded-attempt, fixed-delay decoration over any gateway.
//!
//! [`Retry`] wraps a [`Gateway`] behind the same `send` contract, layering
//! retry on by composition. The inner gateway stays pure; the decorator owns
//! the attempt loop, the cancellable inter-attempt pause, and attempt-level
//! event publishing.
//!
//! ## Event flow
//! For each attempt, the decorator publishes:
//! ```text
//! AttemptStarting → [gateway send] → Delivered (success)
//!                                  → AttemptFailed (error)
//!
//! If retry scheduled:
//!   → RetryScheduled → [sleep] → (next attempt)
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**: attempt N+1 never starts before attempt
//!   N's failure is observed and the delay elapses.
//! - Success returns immediately — no further attempts, no delay.
//! - Every inner error is retried identically; there is no retryable/fatal
//!   split, so a validation failure spends the full budget like any other.
//! - Cancellation is checked at **safe points** only: before each attempt
//!   and during the inter-attempt sleep. An attempt already in flight is
//!   never preempted.

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::DeliveryError;
use crate::events::{Bus, Event, EventKind};
use crate::gateways::Gateway;
use crate::notifications::{Channel, Notification};
use crate::policies::RetryPolicy;

use async_trait::async_trait;

/// Adds bounded-attempt, fixed-delay retry to any [`Gateway`].
///
/// ### Responsibilities
/// - **Attempt loop**: up to `policy.max_attempts` sequential attempts
/// - **Fixed pause**: `policy.delay` between attempts, raced against the
///   cancellation token
/// - **Event publishing**: reports attempt lifecycle to the bus
/// - **Exhaustion**: surfaces [`DeliveryError::RetriesExhausted`] carrying
///   the last inner error and the attempt count
///
/// Retry state (attempt counter, last error) is local to each `send` call;
/// the decorator itself holds no mutable state and is safe to share.
pub struct Retry<G> {
    inner: G,
    policy: RetryPolicy,
    bus: Bus,
    token: CancellationToken,
}

impl<G: Gateway> Retry<G> {
    /// Wraps `inner` with the given policy.
    ///
    /// `token` is the shutdown signal observed between attempts; `bus`
    /// receives attempt-level events.
    pub fn new(inner: G, policy: RetryPolicy, bus: Bus, token: CancellationToken) -> Self {
        Self {
            inner,
            policy,
            bus,
            token,
        }
    }
}

#[async_trait]
impl<G: Gateway> Gateway for Retry<G> {
    fn channel(&self) -> Channel {
        self.inner.channel()
    }

    /// Runs the attempt loop until success, exhaustion, or cancellation.
    ///
    /// ### Exit conditions
    /// - Inner `send` succeeds → `Ok(())`, after publishing `Delivered`.
    /// - `max_attempts` failures → [`DeliveryError::RetriesExhausted`].
    /// - Cancellation observed before an attempt or during a pause →
    ///   [`DeliveryError::Canceled`]; no further attempts are made.
    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt: u32 = 0;

        loop {
            if self.token.is_cancelled() {
                return Err(DeliveryError::Canceled);
            }

            attempt += 1;
            self.bus.publish(
                Event::new(EventKind::AttemptStarting)
                    .with_notification(notification.id())
                    .with_channel(self.inner.channel())
                    .with_attempt(attempt),
            );

            let err = match self.inner.send(notification).await {
                Ok(()) => {
                    self.bus.publish(
                        Event::new(EventKind::Delivered)
                            .with_notification(notification.id())
                            .with_attempt(attempt),
                    );
                    return Ok(());
                }
                Err(err) => err,
            };

            self.bus.publish(
                Event::new(EventKind::AttemptFailed)
                    .with_notification(notification.id())
                    .with_attempt(attempt)
                    .with_reason(err.to_string()),
            );

            if attempt >= max_attempts {
                return Err(DeliveryError::RetriesExhausted {
                    attempts: attempt,
                    cause: Box::new(err),
                });
            }

            self.bus.publish(
                Event::new(EventKind::RetryScheduled)
                    .with_notification(notification.id())
                    .with_attempt(attempt)
                    .with_delay(self.policy.delay)
                    .with_reason(err.to_string()),
            );

            let sleep = time::sleep(self.policy.delay);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = self.token.cancelled() => {
                    return Err(DeliveryError::Canceled);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::notifications::Recipient;

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyGateway {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyGateway {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Gateway for FlakyGateway {
        fn channel(&self) -> Channel {
            Channel::Push
        }

        async fn send(&self, _notification: &Notification) -> Result<(), DeliveryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(DeliveryError::Gateway {
                    error: format!("attempt {call} refused"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn notification() -> Notification {
        let recipient = Arc::new(Recipient::new("u1").with_push_token("tok"));
        Notification::builder(recipient, Channel::Push).build()
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1000))
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_incurs_no_delay() {
        let gateway = Arc::new(FlakyGateway::new(0));
        let retrying = Retry::new(
            Arc::clone(&gateway),
            policy(),
            Bus::new(64),
            CancellationToken::new(),
        );

        let started = time::Instant::now();
        retrying.send(&notification()).await.expect("should deliver");

        assert_eq!(gateway.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts_with_fixed_delays() {
        let gateway = Arc::new(FlakyGateway::new(u32::MAX));
        let retrying = Retry::new(
            Arc::clone(&gateway),
            policy(),
            Bus::new(64),
            CancellationToken::new(),
        );

        let started = time::Instant::now();
        let err = retrying.send(&notification()).await.unwrap_err();

        assert_eq!(gateway.calls(), 3);
        // Two inter-attempt pauses of 1000ms each.
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
        match err {
            DeliveryError::RetriesExhausted { attempts, cause } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*cause, DeliveryError::Gateway { .. }));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt() {
        let gateway = Arc::new(FlakyGateway::new(2));
        let retrying = Retry::new(
            Arc::clone(&gateway),
            policy(),
            Bus::new(64),
            CancellationToken::new(),
        );

        let started = time::Instant::now();
        retrying.send(&notification()).await.expect("should deliver");

        assert_eq!(gateway.calls(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_during_delay_stops_retrying() {
        let gateway = Arc::new(FlakyGateway::new(u32::MAX));
        let token = CancellationToken::new();
        let retrying = Retry::new(
            Arc::clone(&gateway),
            RetryPolicy::new(3, Duration::from_secs(3600)),
            Bus::new(64),
            token.clone(),
        );

        let n = notification();
        let send = tokio::spawn(async move { retrying.send(&n).await });

        // Let the first attempt fail and the loop park in its delay.
        time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        let err = send.await.expect("send task panicked").unwrap_err();
        assert!(matches!(err, DeliveryError::Canceled));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_before_first_attempt() {
        let gateway = Arc::new(FlakyGateway::new(0));
        let token = CancellationToken::new();
        token.cancel();

        let retrying = Retry::new(Arc::clone(&gateway), policy(), Bus::new(64), token);
        let err = retrying.send(&notification()).await.unwrap_err();

        assert!(matches!(err, DeliveryError::Canceled));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_attempt_lifecycle_events() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let gateway = Arc::new(FlakyGateway::new(1));
        let retrying = Retry::new(
            Arc::clone(&gateway),
            policy(),
            bus.clone(),
            CancellationToken::new(),
        );

        retrying.send(&notification()).await.expect("should deliver");

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::AttemptStarting,
                EventKind::AttemptFailed,
                EventKind::RetryScheduled,
                EventKind::AttemptStarting,
                EventKind::Delivered,
            ]
        );
    }
}
