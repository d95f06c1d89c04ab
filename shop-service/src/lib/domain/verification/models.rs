use crate::domain::user::models::Username;

/// Outcome of presenting a verification token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The flag was flipped by this request.
    Verified(Username),

    /// The account was verified earlier; nothing was written.
    AlreadyVerified,
}
