//! # Notification value object and staged builder.
//!
//! A [`Notification`] is an immutable record of one delivery request:
//! a unique id generated at build time, a shared [`Recipient`], the
//! [`Channel`] to deliver over, and optional subject/body.
//!
//! The builder is staged: recipient and channel are fixed at creation,
//! subject and body may be added before finalization.
//!
//! ## Lifecycle
//! Built once per send request, consumed by exactly one dispatch task,
//! then discarded. Nothing is persisted.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use notivisor::{Channel, Notification, Recipient};
//!
//! let recipient = Arc::new(Recipient::new("user-123").with_email("a@b.com"));
//!
//! let notification = Notification::builder(recipient, Channel::Email)
//!     .subject("Welcome!")
//!     .body("Glad to have you on board.")
//!     .build();
//!
//! assert_eq!(notification.channel(), Channel::Email);
//! assert_eq!(notification.subject(), Some("Welcome!"));
//! ```

use std::sync::Arc;

use uuid::Uuid;

use crate::notifications::{Channel, Recipient};

/// One delivery request: id, recipient, channel, optional subject/body.
#[derive(Debug, Clone)]
pub struct Notification {
    id: String,
    recipient: Arc<Recipient>,
    channel: Channel,
    subject: Option<String>,
    body: Option<String>,
}

impl Notification {
    /// Starts a builder with the two fields every notification must have.
    pub fn builder(recipient: Arc<Recipient>, channel: Channel) -> NotificationBuilder {
        NotificationBuilder {
            recipient,
            channel,
            subject: None,
            body: None,
        }
    }

    /// Returns the unique id, generated at build time and never reused.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the recipient.
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Returns the delivery channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns the subject, if set.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the body, if set.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Staged builder for [`Notification`].
///
/// Recipient and channel are fixed at creation; subject and body are
/// optional. [`build`](NotificationBuilder::build) generates the id.
pub struct NotificationBuilder {
    recipient: Arc<Recipient>,
    channel: Channel,
    subject: Option<String>,
    body: Option<String>,
}

impl NotificationBuilder {
    /// Sets the subject (push gateways reuse it as the title).
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the body text.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Finalizes the notification, generating its unique id.
    pub fn build(self) -> Notification {
        Notification {
            id: Uuid::new_v4().to_string(),
            recipient: self.recipient,
            channel: self.channel,
            subject: self.subject,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Arc<Recipient> {
        Arc::new(Recipient::new("user-1").with_email("a@b.com"))
    }

    #[test]
    fn test_builder_fixes_recipient_and_channel() {
        let notification = Notification::builder(recipient(), Channel::Email)
            .subject("Hi")
            .body("test")
            .build();

        assert_eq!(notification.channel(), Channel::Email);
        assert_eq!(notification.recipient().user_id(), "user-1");
        assert_eq!(notification.subject(), Some("Hi"));
        assert_eq!(notification.body(), Some("test"));
    }

    #[test]
    fn test_subject_and_body_are_optional() {
        let notification = Notification::builder(recipient(), Channel::Sms).build();
        assert!(notification.subject().is_none());
        assert!(notification.body().is_none());
    }

    #[test]
    fn test_ids_are_unique_per_build() {
        let a = Notification::builder(recipient(), Channel::Email).build();
        let b = Notification::builder(recipient(), Channel::Email).build();
        assert_ne!(a.id(), b.id());
        assert!(!a.id().is_empty());
    }
}
