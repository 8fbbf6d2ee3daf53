//! Error types used by the dispatch pool and gateways.
//!
//! This module defines two main error enums:
//!
//! - [`DeliveryError`] — failures of one notification's delivery.
//! - [`PoolError`] — failures of the pool runtime itself.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.
//!
//! Delivery errors never cross the worker boundary: the pool catches them,
//! publishes a terminal event, and discards them. There is no dead-letter
//! path — a notification that exhausts its retries is lost after the event.

use std::time::Duration;
use thiserror::Error;

use crate::notifications::Channel;

/// # Errors produced while delivering one notification.
///
/// Every variant is treated identically by the retry loop: there is no
/// retryable/fatal split, so a validation failure such as
/// [`DeliveryError::MissingContactField`] consumes the full retry budget
/// just like a transient gateway failure.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The recipient lacks the contact field the channel requires.
    #[error("recipient {user_id} has no {field} for {channel} delivery")]
    MissingContactField {
        /// Channel that was asked to deliver.
        channel: Channel,
        /// Name of the missing recipient field.
        field: &'static str,
        /// Identity of the recipient.
        user_id: String,
    },

    /// The gateway's (simulated) transport failed for this attempt.
    #[error("gateway failure: {error}")]
    Gateway {
        /// The underlying error message.
        error: String,
    },

    /// Every attempt up to the configured maximum failed.
    #[error("delivery failed after {attempts} attempts: {cause}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The last underlying error.
        #[source]
        cause: Box<DeliveryError>,
    },

    /// Shutdown was observed inside the retry loop; remaining attempts
    /// were abandoned.
    #[error("delivery canceled by shutdown")]
    Canceled,
}

impl DeliveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use notivisor::DeliveryError;
    ///
    /// let err = DeliveryError::Gateway { error: "boom".into() };
    /// assert_eq!(err.as_label(), "gateway_failure");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::MissingContactField { .. } => "missing_contact_field",
            DeliveryError::Gateway { .. } => "gateway_failure",
            DeliveryError::RetriesExhausted { .. } => "retries_exhausted",
            DeliveryError::Canceled => "delivery_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DeliveryError::MissingContactField {
                channel,
                field,
                user_id,
            } => format!("missing {field} on recipient {user_id} for {channel}"),
            DeliveryError::Gateway { error } => format!("gateway: {error}"),
            DeliveryError::RetriesExhausted { attempts, cause } => {
                format!("exhausted after {attempts} attempts; last: {cause}")
            }
            DeliveryError::Canceled => "canceled by shutdown".to_string(),
        }
    }
}

/// # Errors produced by the pool runtime.
///
/// These represent failures of the dispatch machinery itself, not of any
/// individual notification.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PoolError {
    /// Graceful drain exceeded its grace period; some deliveries were still
    /// in flight.
    #[error("drain grace {grace:?} exceeded; in flight: {pending:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Ids of notifications still in flight when the grace expired.
        pending: Vec<String>,
    },
}

impl PoolError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PoolError::GraceExceeded { .. } => "pool_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PoolError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; in-flight={pending:?}")
            }
        }
    }
}
