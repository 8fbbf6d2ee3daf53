//! # Event subscribers for the dispatch pipeline.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling delivery events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Retry/Worker ── publish(Event) ──► Bus ──► pool listener ──► SubscriberSet
//!                                                                    │
//!                                                         ┌──────────┼─────────┐
//!                                                         ▼          ▼         ▼
//!                                                     LogWriter  Inflight   Custom
//!                                                                 Tracker    sinks
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, metrics,
//!   alerts)
//! - **Stateful subscribers** - maintain internal state based on events
//!   ([`InflightTracker`])

mod inflight;
mod log;
mod set;
mod subscribe;

pub use inflight::InflightTracker;
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
