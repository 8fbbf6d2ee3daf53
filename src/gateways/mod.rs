//! # Gateways: per-channel delivery capabilities and their composition.
//!
//! This module provides the delivery side of the pipeline:
//! - [`Gateway`] - trait for one channel's send capability
//! - [`GatewayRef`] - shared handle (`Arc<dyn Gateway>`)
//! - [`EmailGateway`], [`SmsGateway`], [`PushGateway`] - the stock channel
//!   gateways, each validating the contact field its channel requires
//! - [`GatewayRegistry`] - channel → gateway resolution, construct-once cache
//! - [`Retry`] - decorator layering bounded-attempt fixed-delay retry over
//!   any gateway
//!
//! ## Composition
//! ```text
//! registry.resolve(channel) ──► GatewayRef (shared, stateless)
//!            │
//!            ▼
//! Retry::new(gateway, policy, bus, token) ──► Gateway with retry semantics
//! ```

mod email;
mod gateway;
mod push;
mod registry;
mod retry;
mod sms;

pub use email::EmailGateway;
pub use gateway::{Gateway, GatewayRef};
pub use push::PushGateway;
pub use registry::GatewayRegistry;
pub use retry::Retry;
pub use sms::SmsGateway;
