use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::TokenPurpose;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Domain service for login and bearer-token resolution.
///
/// Each login attempt runs `Start -> CredentialsChecked -> {TokenIssued | Rejected}`
/// and leaves nothing behind; issued tokens are not tracked server side.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: String,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User lookup
    /// * `authenticator` - Password hasher and token codec built from startup configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let decoy_hash = authenticator
            .hash_password("decoy-password-for-unknown-users")
            .unwrap_or_else(|e| {
                tracing::error!("Failed to prepare decoy password hash: {}", e);
                String::new()
            });

        Self {
            repository,
            authenticator,
            decoy_hash,
        }
    }

    /// Look up the login candidate.
    ///
    /// Malformed and unknown usernames still pay for one password
    /// verification, so response time does not reveal which usernames exist.
    async fn find_candidate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let candidate = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        candidate.ok_or_else(|| {
            self.authenticator.verify_password(password, &self.decoy_hash);
            tracing::warn!("Login rejected: unknown or malformed username");
            AuthError::Unauthorized
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.find_candidate(username, password).await?;

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::Unauthorized);
        }

        Ok(user)
    }

    async fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self.find_candidate(username, password).await?;
        let claims = Claims::for_user(user.id.0, user.username.as_str());

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
                    AuthError::Unauthorized
                }
                AuthenticationError::JwtError(err) => AuthError::TokenIssuance(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "Access token issued");
        Ok(result.access_token)
    }

    async fn resolve_bearer(&self, token: &str) -> Result<User, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("Bearer token rejected: {}", e);
            AuthError::Unauthorized
        })?;

        if !claims.is_for(TokenPurpose::Access) {
            tracing::warn!(user_id = claims.id, "Bearer token rejected: not an access token");
            return Err(AuthError::Unauthorized);
        }

        let user_id = UserId(claims.id);
        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Bearer token names an unknown user");
                AuthError::Unauthorized
            })
    }
}
