//! Email gateway: requires `Recipient::email`.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::gateways::Gateway;
use crate::notifications::{Channel, Notification};

/// Delivers over [`Channel::Email`].
///
/// Delivery is simulated: a notification with a non-empty recipient email is
/// considered delivered.
#[derive(Debug, Default)]
pub struct EmailGateway;

#[async_trait]
impl Gateway for EmailGateway {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let recipient = notification.recipient();
        let _address = recipient
            .email()
            .filter(|address| !address.is_empty())
            .ok_or_else(|| DeliveryError::MissingContactField {
                channel: Channel::Email,
                field: Channel::Email.contact_field(),
                user_id: recipient.user_id().to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::notifications::Recipient;

    #[tokio::test]
    async fn test_delivers_with_email_present() {
        let recipient = Arc::new(Recipient::new("u1").with_email("a@b.com"));
        let notification = Notification::builder(recipient, Channel::Email)
            .subject("Hi")
            .body("test")
            .build();

        assert!(EmailGateway.send(&notification).await.is_ok());
    }

    #[tokio::test]
    async fn test_fails_without_email() {
        let recipient = Arc::new(Recipient::new("u1").with_phone_number("+15551234567"));
        let notification = Notification::builder(recipient, Channel::Email).build();

        let err = EmailGateway.send(&notification).await.unwrap_err();
        assert!(matches!(
            err,
            DeliveryError::MissingContactField { field: "email", .. }
        ));
    }

    #[tokio::test]
    async fn test_fails_on_empty_email() {
        let recipient = Arc::new(Recipient::new("u1").with_email(""));
        let notification = Notification::builder(recipient, Channel::Email).build();

        assert!(EmailGateway.send(&notification).await.is_err());
    }
}
