//! Push gateway: requires `Recipient::push_token`.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::gateways::Gateway;
use crate::notifications::{Channel, Notification};

/// Delivers over [`Channel::Push`].
///
/// Delivery is simulated: a notification with a non-empty recipient push
/// token is considered delivered. The subject doubles as the push title.
#[derive(Debug, Default)]
pub struct PushGateway;

#[async_trait]
impl Gateway for PushGateway {
    fn channel(&self) -> Channel {
        Channel::Push
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let recipient = notification.recipient();
        let _token = recipient
            .push_token()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DeliveryError::MissingContactField {
                channel: Channel::Push,
                field: Channel::Push.contact_field(),
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
    async fn test_delivers_with_push_token_present() {
        let recipient = Arc::new(Recipient::new("u3").with_push_token("pushToken123"));
        let notification = Notification::builder(recipient, Channel::Push)
            .subject("New Message")
            .body("You have a new message.")
            .build();

        assert!(PushGateway.send(&notification).await.is_ok());
    }

    #[tokio::test]
    async fn test_fails_without_push_token() {
        let recipient = Arc::new(Recipient::new("u3").with_email("a@b.com"));
        let notification = Notification::builder(recipient, Channel::Push).build();

        let err = PushGateway.send(&notification).await.unwrap_err();
        assert!(matches!(
            err,
            DeliveryError::MissingContactField {
                field: "push_token",
                ..
            }
        ));
    }
}
