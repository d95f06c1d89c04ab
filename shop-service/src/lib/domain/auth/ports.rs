use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Port for credential checks and bearer-token handling.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check a username/password pair against stored credentials.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown user or wrong password (indistinguishable)
    /// * `User` - Persistence failure
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Authenticate and issue a signed access token carrying `{id, username}`.
    ///
    /// # Errors
    /// * `Unauthorized` - Credentials rejected
    /// * `TokenIssuance` - Token could not be signed
    /// * `User` - Persistence failure
    async fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, tampered, or user gone
    /// * `User` - Persistence failure
    async fn resolve_bearer(&self, token: &str) -> Result<User, AuthError>;
}
