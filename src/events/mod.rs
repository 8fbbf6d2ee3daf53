//! Delivery events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to delivery lifecycle events emitted by the pool,
//! the retry decorator and the workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `DispatchPool` (shutdown/drain/dropped submissions),
//!   `Retry` (attempt lifecycle), the worker (terminal failures).
//! - **Consumers**: the pool's subscriber listener, which fans out to the
//!   [`SubscriberSet`](crate::SubscriberSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
