use serde::Deserialize;
use serde::Serialize;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Bearer credential for protected routes
    Access,
    /// Single-use proof of email ownership
    Verification,
}

/// Identity claims carried by access and verification tokens.
///
/// `iat` and `exp` are stamped by [`JwtHandler`](super::JwtHandler) and are
/// not part of this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Claims {
    /// User identifier
    pub id: i64,

    /// Username at the time the token was issued
    pub username: String,

    pub purpose: TokenPurpose,
}

impl Claims {
    /// Create access-token claims identifying a user.
    pub fn for_user(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            purpose: TokenPurpose::Access,
        }
    }

    /// Create claims for an emailed confirmation link.
    pub fn for_verification(id: i64, username: impl Into<String>) -> Self {
        Self {
            purpose: TokenPurpose::Verification,
            ..Self::for_user(id, username)
        }
    }

    pub fn is_for(&self, purpose: TokenPurpose) -> bool {
        self.purpose == purpose
    }
}
