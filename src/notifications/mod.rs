//! # Notification value objects.
//!
//! This module provides the immutable domain types:
//! - [`Channel`] - delivery medium (email / sms / push)
//! - [`Recipient`] - user identity plus optional contact fields
//! - [`Notification`] - one delivery request, built via [`NotificationBuilder`]

mod channel;
mod notification;
mod recipient;

pub use channel::Channel;
pub use notification::{Notification, NotificationBuilder};
pub use recipient::Recipient;
