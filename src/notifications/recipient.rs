//! # Recipient value object.
//!
//! A [`Recipient`] identifies a user and carries the contact fields that
//! channels deliver to. All contact fields are optional at construction:
//! whether the populated fields fit the channel actually used is a send-time
//! concern, validated by the gateway, not here.
//!
//! ## Example
//! ```rust
//! use notivisor::Recipient;
//!
//! let recipient = Recipient::new("user-123")
//!     .with_email("john.doe@example.com")
//!     .with_push_token("pushToken123");
//!
//! assert_eq!(recipient.user_id(), "user-123");
//! assert!(recipient.phone_number().is_none());
//! ```

/// Immutable recipient record: identity plus optional contact fields.
///
/// Typically shared as `Arc<Recipient>` across the notifications addressed
/// to the same user; the recipient's lifetime is independent of any single
/// notification.
#[derive(Debug, Clone)]
pub struct Recipient {
    user_id: String,
    email: Option<String>,
    phone_number: Option<String>,
    push_token: Option<String>,
}

impl Recipient {
    /// Creates a recipient with no contact fields populated.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            phone_number: None,
            push_token: None,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Sets the push token.
    pub fn with_push_token(mut self, push_token: impl Into<String>) -> Self {
        self.push_token = Some(push_token.into());
        self
    }

    /// Returns the user identity.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the email address, if populated.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone number, if populated.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Returns the push token, if populated.
    pub fn push_token(&self) -> Option<&str> {
        self.push_token.as_deref()
    }
}
