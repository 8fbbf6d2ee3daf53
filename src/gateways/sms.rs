//! SMS gateway: requires `Recipient::phone_number`.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::gateways::Gateway;
use crate::notifications::{Channel, Notification};

/// Delivers over [`Channel::Sms`].
///
/// Delivery is simulated: a notification with a non-empty recipient phone
/// number is considered delivered.
#[derive(Debug, Default)]
pub struct SmsGateway;

#[async_trait]
impl Gateway for SmsGateway {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let recipient = notification.recipient();
        let _number = recipient
            .phone_number()
            .filter(|number| !number.is_empty())
            .ok_or_else(|| DeliveryError::MissingContactField {
                channel: Channel::Sms,
                field: Channel::Sms.contact_field(),
                user_id: recipient.user_id().to_string(),
            })?;
        Ok(())
    }
}
