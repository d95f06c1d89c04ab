use async_trait::async_trait;
use url::Url;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::verification::errors::DeliveryError;
use crate::domain::verification::models::VerificationResult;

/// Port for the email-ownership confirmation flow.
#[async_trait]
pub trait VerificationGatePort: Send + Sync + 'static {
    /// Build the confirmation URL for a freshly registered user.
    ///
    /// # Errors
    /// * `TokenIssuance` - Verification token could not be signed
    fn issue_verification_link(&self, user: &User) -> Result<Url, AuthError>;

    /// Build the confirmation URL and hand it to the delivery channel.
    ///
    /// # Returns
    /// The URL that was sent
    ///
    /// # Errors
    /// * `LinkIssuance` - Verification token could not be signed
    /// * `InvalidAddress` / `SendFailed` - Delivery channel refused the message
    async fn send_verification_link(&self, user: &User) -> Result<Url, DeliveryError>;

    /// Consume a verification token and mark its user verified.
    ///
    /// Presenting the same token again is not an error and returns
    /// `AlreadyVerified` without touching storage.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, tampered, or user gone
    /// * `User` - Persistence failure
    async fn confirm(&self, token: &str) -> Result<VerificationResult, AuthError>;
}

/// Outbound delivery channel for confirmation links.
#[async_trait]
pub trait ConfirmationSender: Send + Sync + 'static {
    /// Send a confirmation link to `recipient`.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender or recipient address rejected
    /// * `SendFailed` - Transport failure
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        username: &str,
        confirmation_url: &Url,
    ) -> Result<(), DeliveryError>;
}
