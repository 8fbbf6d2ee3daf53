//! # notivisor
//!
//! **Notivisor** is a lightweight notification dispatch library for Rust.
//!
//! It provides primitives to submit notifications (email / SMS / push) to a
//! bounded pool of concurrent workers, resolve a per-channel delivery
//! gateway, and retry transient failures with a fixed delay — while keeping
//! one notification's failure strictly isolated from every other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ Notification │   │ Notification │   │ Notification │
//!     │ (send req #1)│   │ (send req #2)│   │ (send req #3)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  DispatchPool (runtime)                                           │
//! │  - unbounded intake queue (submit never blocks)                   │
//! │  - Semaphore (fixed worker ceiling: Config::pool_size)            │
//! │  - GatewayRegistry (channel → gateway, construct-once cache)      │
//! │  - Bus (broadcast events) + SubscriberSet (fan-out to sinks)      │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │    worker    │   │    worker    │   │    worker    │   │
//!     │ (Retry loop) │   │ (Retry loop) │   │ (Retry loop) │   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │                  │                  │                 │
//!      │ Publishes:       │ Publishes:       │ Publishes:      │
//!      │ - AttemptStarting│ - AttemptFailed  │ - Delivered     │
//!      │ - RetryScheduled │ - RetriesExhaust.│ - DeliveryCanc. │
//!      ▼                  ▼                  ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                        ┌────────────────────────┐
//!                        │   subscriber listener  │
//!                        │    (in DispatchPool)   │
//!                        └───┬────────────────┬───┘
//!                            ▼                ▼
//!                       LogWriter      InflightTracker   (+ custom sinks)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Notification ──► submit() ──► queue ──► dispatcher ──► worker
//!
//! worker:
//!   ├─► gateway = registry.resolve(channel)      (construct-at-most-once)
//!   ├─► retrying = Retry::new(gateway, policy, bus, token)
//!   └─► retrying.send(&notification)
//!         loop {
//!           ├─► attempt += 1, publish AttemptStarting
//!           ├─► gateway.send()
//!           │     ├─ Ok  ──► publish Delivered, return
//!           │     └─ Err ──► publish AttemptFailed
//!           │           ├─ attempt == max ─► Err(RetriesExhausted)
//!           │           └─ else ─► publish RetryScheduled,
//!           │                      sleep(delay) (cancellable) ─► continue
//!           └─ exit early with Err(Canceled) once shutdown is observed
//!         }
//!
//! On Err: worker publishes the terminal event and discards the error —
//! nothing reaches the submitter, nothing disturbs sibling workers.
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                    |
//! |-------------------|------------------------------------------------------------------|---------------------------------------|
//! | **Dispatch**      | Bounded-concurrency, fire-and-forget submission with shutdown.   | [`DispatchPool`], [`Config`]          |
//! | **Gateways**      | Per-channel delivery capability, registry with construct-once cache. | [`Gateway`], [`GatewayRegistry`]  |
//! | **Retry**         | Decorator layering bounded attempts + fixed delay over any gateway. | [`Retry`], [`RetryPolicy`]         |
//! | **Subscriber API**| Hook into delivery events (logging, metrics, custom sinks).      | [`Subscribe`], [`SubscriberSet`]      |
//! | **Errors**        | Typed errors for deliveries and the pool runtime.                | [`DeliveryError`], [`PoolError`]      |
//! | **Domain**        | Immutable notification values with a staged builder.             | [`Notification`], [`Recipient`]       |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use notivisor::{Channel, Config, DispatchPool, LogWriter, Notification, Recipient, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let pool = DispatchPool::new(Config::default(), subscribers);
//!
//!     let recipient = Arc::new(
//!         Recipient::new("user-123")
//!             .with_email("john.doe@example.com")
//!             .with_push_token("pushToken123"),
//!     );
//!
//!     pool.submit(
//!         Notification::builder(Arc::clone(&recipient), Channel::Email)
//!             .subject("Welcome!")
//!             .body("Welcome to the notification system")
//!             .build(),
//!     );
//!
//!     pool.shutdown();
//!     pool.join(Duration::from_secs(5)).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod gateways;
mod notifications;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::DispatchPool;
pub use config::Config;
pub use error::{DeliveryError, PoolError};
pub use events::{Bus, Event, EventKind};
pub use gateways::{
    EmailGateway, Gateway, GatewayRef, GatewayRegistry, PushGateway, Retry, SmsGateway,
};
pub use notifications::{Channel, Notification, NotificationBuilder, Recipient};
pub use policies::RetryPolicy;
pub use subscribers::{InflightTracker, LogWriter, Subscribe, SubscriberSet};
