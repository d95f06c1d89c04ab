use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;
use url::Url;

use crate::domain::user::models::EmailAddress;
use crate::domain::verification::errors::DeliveryError;
use crate::domain::verification::ports::ConfirmationSender;

const SUBJECT: &str = "Confirm your account";

/// Transport seam so the message building can be tested without a relay.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_response| ())
            .map_err(|e| e.to_string())
    }
}

/// Sends confirmation links through an SMTP relay.
pub struct SmtpConfirmationSender {
    mailer: Box<dyn Mailer>,
    from: Mailbox,
}

impl SmtpConfirmationSender {
    /// Connect to `host` over STARTTLS with login credentials.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender address does not parse
    /// * `SendFailed` - Relay could not be configured
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from_address: &str,
        from_name: &str,
    ) -> Result<Self, DeliveryError> {
        let credentials = Credentials::new(username.to_string(), password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| DeliveryError::SendFailed(e.to_string()))?
            .port(port)
            .credentials(credentials)
            .build();

        Self::with_mailer(Box::new(transport), from_address, from_name)
    }

    pub fn with_mailer(
        mailer: Box<dyn Mailer>,
        from_address: &str,
        from_name: &str,
    ) -> Result<Self, DeliveryError> {
        let address = from_address
            .parse::<Address>()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {}", from_address, e)))?;

        Ok(Self {
            mailer,
            from: Mailbox::new(Some(from_name.to_string()), address),
        })
    }

    fn body(username: &str, confirmation_url: &Url) -> String {
        format!(
            "<!DOCTYPE html>\
             <html><body>\
             <p>Hi {username},</p>\
             <p>Thanks for signing up. Confirm your email address to activate your account:</p>\
             <p><a href=\"{url}\">Verify my email</a></p>\
             <p>If you did not create an account you can ignore this message.</p>\
             </body></html>",
            username = username,
            url = confirmation_url,
        )
    }
}

#[async_trait]
impl ConfirmationSender for SmtpConfirmationSender {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        username: &str,
        confirmation_url: &Url,
    ) -> Result<(), DeliveryError> {
        let to = recipient
            .as_str()
            .parse::<Address>()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {}", recipient, e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(Some(username.to_string()), to))
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(Self::body(username, confirmation_url))
            .map_err(|e| DeliveryError::SendFailed(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(DeliveryError::SendFailed)?;

        tracing::debug!(recipient = %recipient, "Confirmation email handed to relay");
        Ok(())
    }
}
