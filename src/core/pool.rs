//! # DispatchPool: bounded-concurrency, fire-and-forget notification dispatch.
//!
//! The [`DispatchPool`] owns the event bus, a [`SubscriberSet`], the
//! [`GatewayRegistry`] and the shared cancellation token. It accepts
//! submissions without blocking the caller and executes each as an
//! independent worker under a fixed concurrency ceiling.
//!
//! ## Key responsibilities
//! - **Non-blocking intake**: `submit()` enqueues on an unbounded channel and
//!   returns; work is never rejected for capacity
//! - **Bounded execution**: a dispatcher loop admits one worker per
//!   semaphore permit (`Config::pool_size` permits)
//! - **Failure isolation**: a worker's failure is published and discarded,
//!   never propagated to the submitter or to sibling workers
//! - **Cooperative shutdown**: one shared [`CancellationToken`], observed at
//!   safe points; `join()` drains with a grace period
//!
//! ## High-level architecture
//! ```text
//! submit(Notification) ──► unbounded queue ──► dispatcher loop
//!                                                │ acquire permit (≤ pool_size)
//!                                                ▼
//!                               worker: resolve gateway ─► Retry ─► send
//!                                                │
//!                               events ──► Bus ──► listener ──► SubscriberSet
//!                                                                ├─ LogWriter
//!                                                                ├─ InflightTracker
//!                                                                └─ custom sinks
//!
//! Shutdown path:
//!   shutdown():  publish ShutdownRequested, cancel token
//!                 ├─ dispatcher stops admitting queued notifications
//!                 ├─ retry loops stop before their next attempt/delay
//!                 └─ later submits are dropped (SubmissionDropped)
//!   join(grace): wait for in-flight workers
//!                 ├─ Ok within grace  → publish DrainedWithinGrace
//!                 └─ grace exceeded   → publish GraceExceeded,
//!                                       Err(PoolError::GraceExceeded{pending})
//! ```
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use notivisor::{Channel, Config, DispatchPool, LogWriter, Notification, Recipient, Subscribe};
//!
//! # async fn run() {
//! let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//! let pool = DispatchPool::new(Config::default(), subscribers);
//!
//! let recipient = Arc::new(Recipient::new("user-123").with_email("john.doe@example.com"));
//! let welcome = Notification::builder(recipient, Channel::Email)
//!     .subject("Welcome!")
//!     .body("Glad to have you on board.")
//!     .build();
//!
//! pool.submit(welcome);
//!
//! pool.shutdown();
//! let _ = pool.join(std::time::Duration::from_secs(5)).await;
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, broadcast, mpsc};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::Config;
use crate::core::worker;
use crate::error::PoolError;
use crate::events::{Bus, Event, EventKind};
use crate::gateways::GatewayRegistry;
use crate::notifications::Notification;
use crate::subscribers::{InflightTracker, Subscribe, SubscriberSet};

/// Bounded-concurrency executor for notification dispatch.
///
/// Construct with [`DispatchPool::new`] (or
/// [`with_registry`](DispatchPool::with_registry) to share a pre-seeded
/// [`GatewayRegistry`]); must be called from within a Tokio runtime, since
/// construction spawns the dispatcher and subscriber workers.
pub struct DispatchPool {
    cfg: Config,
    bus: Bus,
    registry: Arc<GatewayRegistry>,
    inflight: Arc<InflightTracker>,
    queue: mpsc::UnboundedSender<Notification>,
    token: CancellationToken,
    tracker: TaskTracker,
}

impl DispatchPool {
    /// Creates a pool with a fresh [`GatewayRegistry`] and the provided
    /// subscribers.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        Self::with_registry(cfg, subscribers, Arc::new(GatewayRegistry::new()))
    }

    /// Creates a pool around an existing registry (e.g. one pre-seeded with
    /// custom gateways via [`GatewayRegistry::install`]).
    ///
    /// An [`InflightTracker`] is always appended to the subscriber set; it
    /// backs the stuck-delivery diagnostics of [`join`](DispatchPool::join).
    pub fn with_registry(
        cfg: Config,
        mut subscribers: Vec<Arc<dyn Subscribe>>,
        registry: Arc<GatewayRegistry>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let inflight = Arc::new(InflightTracker::new());
        subscribers.push(Arc::clone(&inflight) as Arc<dyn Subscribe>);

        let subs = Arc::new(SubscriberSet::new(subscribers));
        Self::subscriber_listener(&bus, Arc::clone(&subs));

        let (queue, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let tracker = TaskTracker::new();
        tracker.spawn(Self::dispatch_loop(
            rx,
            cfg.clone(),
            Arc::clone(&registry),
            bus.clone(),
            token.clone(),
            tracker.clone(),
        ));

        Self {
            cfg,
            bus,
            registry,
            inflight,
            queue,
            token,
            tracker,
        }
    }

    /// Enqueues a notification for asynchronous dispatch.
    ///
    /// Returns immediately; the caller never blocks on worker availability
    /// and receives no delivery result (fire-and-forget). After
    /// [`shutdown`](DispatchPool::shutdown) this is a no-op toward the
    /// caller — the notification is dropped and a
    /// [`EventKind::SubmissionDropped`] event is published.
    pub fn submit(&self, notification: Notification) {
        if self.token.is_cancelled() {
            self.bus.publish(
                Event::new(EventKind::SubmissionDropped).with_notification(notification.id()),
            );
            return;
        }
        if let Err(rejected) = self.queue.send(notification) {
            self.bus.publish(
                Event::new(EventKind::SubmissionDropped).with_notification(rejected.0.id()),
            );
        }
    }

    /// Signals shutdown. Idempotent and non-blocking.
    ///
    /// Queued notifications that have not started are not guaranteed to
    /// start; in-flight attempts are not aborted, but no further attempt or
    /// retry begins once a worker observes the cancellation. Later `submit`
    /// calls are silently dropped.
    pub fn shutdown(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.token.cancel();
    }

    /// Waits up to `grace` for in-flight workers to finish.
    ///
    /// Call after [`shutdown`](DispatchPool::shutdown). Publishes
    /// [`EventKind::DrainedWithinGrace`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`PoolError::GraceExceeded`] listing the notifications still in
    /// flight.
    pub async fn join(&self, grace: Duration) -> Result<(), PoolError> {
        self.tracker.close();
        match time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::DrainedWithinGrace));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                let pending = self.inflight.snapshot().await;
                Err(PoolError::GraceExceeded { grace, pending })
            }
        }
    }

    /// True once [`shutdown`](DispatchPool::shutdown) has been signaled.
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns the grace period configured for drains.
    pub fn grace(&self) -> Duration {
        self.cfg.grace
    }

    /// Ids of notifications currently being delivered (eventually
    /// consistent).
    pub async fn inflight(&self) -> Vec<String> {
        self.inflight.snapshot().await
    }

    /// Creates an independent receiver of the pool's event stream.
    ///
    /// Receivers only observe events published after subscription; slow
    /// receivers may lag and skip old items.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Returns the gateway registry workers resolve from.
    pub fn registry(&self) -> &Arc<GatewayRegistry> {
        &self.registry
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget). Exits when the bus closes; lagged receivers skip
    /// missed items and keep going.
    fn subscriber_listener(bus: &Bus, subs: Arc<SubscriberSet>) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => subs.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Receives queued notifications and spawns one worker per item, gated
    /// by the semaphore so at most `pool_size` execute concurrently.
    ///
    /// ### Exit conditions
    /// - the cancellation token fires (shutdown), or
    /// - all senders dropped (pool handle gone) and the queue is empty.
    async fn dispatch_loop(
        mut rx: mpsc::UnboundedReceiver<Notification>,
        cfg: Config,
        registry: Arc<GatewayRegistry>,
        bus: Bus,
        token: CancellationToken,
        tracker: TaskTracker,
    ) {
        let semaphore = Arc::new(Semaphore::new(cfg.pool_size_clamped()));
        let policy = cfg.retry_policy();

        loop {
            let notification = tokio::select! {
                _ = token.cancelled() => break,
                received = rx.recv() => match received {
                    Some(notification) => notification,
                    None => break,
                },
            };

            let permit = tokio::select! {
                _ = token.cancelled() => break,
                acquired = Arc::clone(&semaphore).acquire_owned() => match acquired {
                    Ok(permit) => permit,
                    Err(_closed) => break,
                },
            };

            let registry = Arc::clone(&registry);
            let bus = bus.clone();
            let token = token.clone();
            tracker.spawn(async move {
                let _permit = permit;
                worker::dispatch(notification, &registry, policy, &bus, &token).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::DeliveryError;
    use crate::gateways::Gateway;
    use crate::notifications::{Channel, Recipient};

    /// Instrumented gateway: counts calls, tracks a concurrency gauge, and
    /// can be told to always fail.
    struct ProbeGateway {
        calls: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
        hold: Duration,
        fail: bool,
    }

    impl ProbeGateway {
        fn new(hold: Duration, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
                hold,
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Gateway for ProbeGateway {
        fn channel(&self) -> Channel {
            Channel::Push
        }

        async fn send(&self, _notification: &Notification) -> Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now_active, Ordering::SeqCst);

            time::sleep(self.hold).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            if self.fail {
                Err(DeliveryError::Gateway {
                    error: "probe refused".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn push_notification() -> Notification {
        let recipient = Arc::new(Recipient::new("user-1").with_push_token("tok"));
        Notification::builder(recipient, Channel::Push).build()
    }

    async fn wait_until(mut done: impl FnMut() -> bool) {
        for _ in 0..10_000 {
            if done() {
                return;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    fn small_retry_cfg() -> Config {
        Config {
            pool_size: 4,
            retry_delay: Duration::from_millis(10),
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_submissions_eventually_attempted() {
        let probe = ProbeGateway::new(Duration::from_millis(5), false);
        let registry = Arc::new(GatewayRegistry::new());
        registry.install(Channel::Push, Arc::clone(&probe)).await;

        let pool = DispatchPool::with_registry(small_retry_cfg(), Vec::new(), registry);
        for _ in 0..25 {
            pool.submit(push_notification());
        }

        wait_until(|| probe.calls() == 25).await;

        pool.shutdown();
        pool.join(Duration::from_secs(5)).await.expect("drain");
        assert_eq!(probe.calls(), 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_never_exceeds_pool_size() {
        let probe = ProbeGateway::new(Duration::from_millis(50), false);
        let registry = Arc::new(GatewayRegistry::new());
        registry.install(Channel::Push, Arc::clone(&probe)).await;

        let pool = DispatchPool::with_registry(small_retry_cfg(), Vec::new(), registry);
        for _ in 0..20 {
            pool.submit(push_notification());
        }

        wait_until(|| probe.calls() == 20).await;
        pool.shutdown();
        pool.join(Duration::from_secs(5)).await.expect("drain");

        assert!(probe.max_active.load(Ordering::SeqCst) <= 4);
        assert!(probe.max_active.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_after_shutdown_never_attempts() {
        let probe = ProbeGateway::new(Duration::ZERO, false);
        let registry = Arc::new(GatewayRegistry::new());
        registry.install(Channel::Push, Arc::clone(&probe)).await;

        let pool = DispatchPool::with_registry(small_retry_cfg(), Vec::new(), registry);
        let mut events = pool.subscribe();

        pool.shutdown();
        assert!(pool.is_shutdown());
        pool.submit(push_notification());

        pool.join(Duration::from_secs(5)).await.expect("drain");
        assert_eq!(probe.calls(), 0);

        let mut saw_dropped = false;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::SubmissionDropped {
                saw_dropped = true;
            }
        }
        assert!(saw_dropped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_retry_wait_stops_attempts() {
        let probe = ProbeGateway::new(Duration::ZERO, true);
        let registry = Arc::new(GatewayRegistry::new());
        registry.install(Channel::Push, Arc::clone(&probe)).await;

        let cfg = Config {
            pool_size: 2,
            retry_delay: Duration::from_secs(3600),
            ..Config::default()
        };
        let pool = DispatchPool::with_registry(cfg, Vec::new(), registry);
        pool.submit(push_notification());

        // First attempt fails, then the retry loop parks in its delay.
        wait_until(|| probe.calls() == 1).await;
        pool.shutdown();
        pool.join(Duration::from_secs(5)).await.expect("drain");

        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_dispatch_never_blocks_siblings() {
        // Stock gateways: five deliverable emails plus one push notification
        // whose recipient has no token (fails validation every attempt).
        let pool = DispatchPool::new(small_retry_cfg(), Vec::new());
        let mut events = pool.subscribe();

        let tokenless = Arc::new(Recipient::new("user-2").with_email("a@b.com"));
        pool.submit(Notification::builder(Arc::clone(&tokenless), Channel::Push).build());
        for _ in 0..5 {
            let recipient = Arc::new(Recipient::new("user-3").with_email("c@d.com"));
            pool.submit(
                Notification::builder(recipient, Channel::Email)
                    .subject("Hi")
                    .body("test")
                    .build(),
            );
        }

        let mut delivered = 0;
        let mut exhausted = 0;
        while delivered < 5 || exhausted < 1 {
            match events.recv().await.expect("event stream closed") {
                ev if ev.kind == EventKind::Delivered => delivered += 1,
                ev if ev.kind == EventKind::RetriesExhausted => {
                    exhausted += 1;
                    assert_eq!(ev.attempt, Some(3));
                }
                _ => {}
            }
        }

        pool.shutdown();
        pool.join(Duration::from_secs(5)).await.expect("drain");
        assert_eq!(delivered, 5);
        assert_eq!(exhausted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_reports_stuck_deliveries() {
        let probe = ProbeGateway::new(Duration::from_secs(3600), false);
        let registry = Arc::new(GatewayRegistry::new());
        registry.install(Channel::Push, Arc::clone(&probe)).await;

        let pool = DispatchPool::with_registry(small_retry_cfg(), Vec::new(), registry);
        let notification = push_notification();
        let id = notification.id().to_string();
        pool.submit(notification);

        wait_until(|| probe.calls() == 1).await;
        // The inflight tracker applies AttemptStarting through its queue;
        // wait for it to catch up before draining.
        for _ in 0..10_000 {
            if pool.inflight().await.contains(&id) {
                break;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        assert!(pool.inflight().await.contains(&id));

        pool.shutdown();
        let err = pool.join(Duration::from_millis(50)).await.unwrap_err();
        match err {
            PoolError::GraceExceeded { pending, .. } => {
                assert_eq!(pending, vec![id]);
            }
        }
    }
}
