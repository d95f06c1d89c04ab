use thiserror::Error;

use crate::user::errors::UserError;

/// Errors surfaced by authentication and token verification.
///
/// Every credential or token problem collapses into `Unauthorized` so callers
/// cannot tell an unknown user from a wrong password or a forged token.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Token generation failed: {0}")]
    TokenIssuance(String),

    // Persistence failures pass through untouched
    #[error(transparent)]
    User(#[from] UserError),
}
