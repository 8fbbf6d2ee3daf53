//! # Gateway abstraction.
//!
//! This module defines the [`Gateway`] trait (async, per-channel delivery
//! capability) and the shared handle type [`GatewayRef`], an
//! `Arc<dyn Gateway>` suitable for sharing across workers.
//!
//! A gateway validates the recipient fields its channel requires and
//! performs the (simulated) delivery. It holds no per-call mutable state,
//! so one instance is safe to share across all concurrent workers. Retry and
//! delays are layered on by composition (see [`Retry`](crate::Retry)), never
//! by the gateway itself.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::notifications::{Channel, Notification};

/// Shared handle to a gateway.
pub type GatewayRef = Arc<dyn Gateway>;

/// # Per-channel delivery capability.
///
/// A `Gateway` delivers notifications over exactly one [`Channel`]. It
/// validates the contact field its channel requires and fails with
/// [`DeliveryError::MissingContactField`] when the field is absent or empty.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use notivisor::{Channel, DeliveryError, Gateway, Notification};
///
/// struct CarrierPigeon;
///
/// #[async_trait]
/// impl Gateway for CarrierPigeon {
///     fn channel(&self) -> Channel { Channel::Sms }
///
///     async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
///         // release the bird...
///         let _ = notification;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Gateway: Send + Sync + 'static {
    /// Returns the channel this gateway delivers over.
    fn channel(&self) -> Channel;

    /// Delivers one notification, or fails with a [`DeliveryError`].
    ///
    /// Implementations perform a single attempt: no retry, no backoff.
    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    fn channel(&self) -> Channel {
        (**self).channel()
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        (**self).send(notification).await
    }
}
