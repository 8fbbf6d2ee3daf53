//! # Delivery channels.
//!
//! [`Channel`] enumerates the media a notification can be delivered over.
//! Each channel requires a specific contact field on the
//! [`Recipient`](crate::Recipient); the mapping is exposed via
//! [`Channel::contact_field`] so gateways and error messages agree on the
//! field name.

use std::fmt;

/// Notification delivery medium.
///
/// The channel is fixed when a [`Notification`](crate::Notification) is
/// built and determines which gateway the pool resolves for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Electronic mail; requires `Recipient::email`.
    Email,
    /// Text message; requires `Recipient::phone_number`.
    Sms,
    /// Mobile push; requires `Recipient::push_token`.
    Push,
}

impl Channel {
    /// Returns a short stable label (lowercase) for use in logs/events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        }
    }

    /// Name of the recipient field this channel delivers to.
    pub fn contact_field(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "phone_number",
            Channel::Push => "push_token",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
