use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::TokenPurpose;
use url::Url;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::verification::errors::DeliveryError;
use crate::domain::verification::models::VerificationResult;
use crate::domain::verification::ports::ConfirmationSender;
use crate::domain::verification::ports::VerificationGatePort;

/// Query parameter carrying the verification token.
pub const TOKEN_PARAM: &str = "token";

/// Issues confirmation links and flips `is_verified` when one comes back.
pub struct VerificationGate<UR, CS>
where
    UR: UserRepository,
    CS: ConfirmationSender + ?Sized,
{
    repository: Arc<UR>,
    sender: Arc<CS>,
    authenticator: Arc<Authenticator>,
    confirmation_url: Url,
}

impl<UR, CS> VerificationGate<UR, CS>
where
    UR: UserRepository,
    CS: ConfirmationSender + ?Sized,
{
    /// Create a new verification gate.
    ///
    /// # Arguments
    /// * `repository` - User lookup and conditional update
    /// * `sender` - Delivery channel for confirmation links
    /// * `authenticator` - Token codec for confirmation links, with the link lifetime
    /// * `confirmation_url` - Public URL of the verification endpoint; the
    ///   token is appended as a query parameter
    pub fn new(
        repository: Arc<UR>,
        sender: Arc<CS>,
        authenticator: Arc<Authenticator>,
        confirmation_url: Url,
    ) -> Self {
        Self {
            repository,
            sender,
            authenticator,
            confirmation_url,
        }
    }
}

#[async_trait]
impl<UR, CS> VerificationGatePort for VerificationGate<UR, CS>
where
    UR: UserRepository,
    CS: ConfirmationSender + ?Sized,
{
    fn issue_verification_link(&self, user: &User) -> Result<Url, AuthError> {
        let claims = Claims::for_verification(user.id.0, user.username.as_str());
        let token = self
            .authenticator
            .generate_token(&claims)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        let mut url = self.confirmation_url.clone();
        url.query_pairs_mut().append_pair(TOKEN_PARAM, &token);
        Ok(url)
    }

    async fn send_verification_link(&self, user: &User) -> Result<Url, DeliveryError> {
        let url = self
            .issue_verification_link(user)
            .map_err(|e| DeliveryError::LinkIssuance(e.to_string()))?;

        self.sender
            .send_confirmation(&user.email, user.username.as_str(), &url)
            .await?;

        tracing::info!(user_id = %user.id, "Confirmation link sent");
        Ok(url)
    }

    async fn confirm(&self, token: &str) -> Result<VerificationResult, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("Verification token rejected: {}", e);
            AuthError::Unauthorized
        })?;

        if !claims.is_for(TokenPurpose::Verification) {
            tracing::warn!(user_id = claims.id, "Verification rejected: not a verification token");
            return Err(AuthError::Unauthorized);
        }

        let user_id = UserId(claims.id);
        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Verification token names an unknown user");
                AuthError::Unauthorized
            })?;

        if user.is_verified {
            tracing::debug!(user_id = %user.id, "User already verified");
            return Ok(VerificationResult::AlreadyVerified);
        }

        // Another request may have won between the read and this write.
        if self.repository.mark_verified(&user.id).await? {
            tracing::info!(user_id = %user.id, "User verified");
            Ok(VerificationResult::Verified(user.username))
        } else {
            Ok(VerificationResult::AlreadyVerified)
        }
    }
}
