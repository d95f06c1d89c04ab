use async_trait::async_trait;
use url::Url;

use crate::domain::user::models::EmailAddress;
use crate::domain::verification::errors::DeliveryError;
use crate::domain::verification::ports::ConfirmationSender;

/// Writes confirmation links to the log instead of mailing them.
///
/// Used when no SMTP relay is configured, e.g. in local development.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingConfirmationSender;

impl LoggingConfirmationSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfirmationSender for LoggingConfirmationSender {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        username: &str,
        confirmation_url: &Url,
    ) -> Result<(), DeliveryError> {
        tracing::info!(
            recipient = %recipient,
            username = username,
            url = %confirmation_url,
            "Confirmation link (not mailed)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_succeeds() {
        let sender = LoggingConfirmationSender::new();
        let result = sender
            .send_confirmation(
                &EmailAddress::new("alice@example.com".to_string()).unwrap(),
                "alice",
                &Url::parse("http://localhost:8000/verification?token=abc").unwrap(),
            )
            .await;

        assert!(result.is_ok());
    }
}
