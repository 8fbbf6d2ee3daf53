//! # Execute one notification's dispatch.
//!
//! Runs a single notification end to end: resolve the gateway for its
//! channel, wrap it in the retry decorator, invoke delivery, and absorb the
//! outcome at the worker boundary.
//!
//! ## Event flow
//! ```text
//! Success:
//!   Retry::send() → Ok(()) → (Delivered already published by the decorator)
//!
//! Exhaustion:
//!   Retry::send() → Err(RetriesExhausted) → publish RetriesExhausted
//!
//! Shutdown observed:
//!   Retry::send() → Err(Canceled) → publish DeliveryCanceled
//! ```
//!
//! ## Rules
//! - Every error is caught here; **nothing** propagates to the pool, the
//!   submitter, or sibling workers.
//! - Exactly one terminal event is published per failed dispatch.

use tokio_util::sync::CancellationToken;

use crate::error::DeliveryError;
use crate::events::{Bus, Event, EventKind};
use crate::gateways::{Gateway, GatewayRegistry, Retry};
use crate::notifications::Notification;
use crate::policies::RetryPolicy;

/// Delivers one notification, isolating its failure from everything else.
///
/// Resolves the gateway for the notification's channel, wraps it in
/// [`Retry`] with the given policy, and sends. The returned error — retries
/// exhausted or canceled by shutdown — is converted into a terminal event
/// and discarded: delivery is fire-and-forget toward the submitter.
pub(crate) async fn dispatch(
    notification: Notification,
    registry: &GatewayRegistry,
    policy: RetryPolicy,
    bus: &Bus,
    token: &CancellationToken,
) {
    let gateway = registry.resolve(notification.channel()).await;
    let retrying = Retry::new(gateway, policy, bus.clone(), token.child_token());

    match retrying.send(&notification).await {
        Ok(()) => {}
        Err(DeliveryError::RetriesExhausted { attempts, cause }) => {
            bus.publish(
                Event::new(EventKind::RetriesExhausted)
                    .with_notification(notification.id())
                    .with_attempt(attempts)
                    .with_reason(cause.to_string()),
            );
        }
        Err(DeliveryError::Canceled) => {
            bus.publish(
                Event::new(EventKind::DeliveryCanceled).with_notification(notification.id()),
            );
        }
        Err(other) => {
            // Retry only surfaces the two variants above; anything else is
            // still terminal for this notification.
            bus.publish(
                Event::new(EventKind::RetriesExhausted)
                    .with_notification(notification.id())
                    .with_reason(other.to_string()),
            );
        }
    }
}
