use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Caller claims plus the timestamps owned by the handler.
#[derive(Serialize)]
struct StampedClaims<'a, T: Serialize> {
    #[serde(flatten)]
    claims: &'a T,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow services to define their own token payload.
/// The signing secret, algorithm and expiry policy are fixed at construction; the
/// handler holds no mutable state and can be shared freely between requests.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiration: Option<Duration>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// Uses HS256 and issues tokens without an `exp` claim. Use
    /// [`JwtHandler::with_expiration`] to enforce expiry.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: None,
        }
    }

    /// Create a handler from configuration values.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret
    /// * `algorithm` - Algorithm name (`HS256`, `HS384` or `HS512`)
    /// * `expiration` - Token lifetime; `None` disables expiry entirely
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Unknown or non-HMAC algorithm name
    pub fn from_settings(
        secret: &[u8],
        algorithm: &str,
        expiration: Option<Duration>,
    ) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| JwtError::UnsupportedAlgorithm(algorithm.to_string()))?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            expiration,
        })
    }

    /// Enforce expiry: issued tokens carry `exp = iat + ttl` and decoding
    /// rejects tokens without a valid `exp`.
    pub fn with_expiration(mut self, ttl: Duration) -> Self {
        self.expiration = Some(ttl);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn expiration(&self) -> Option<Duration> {
        self.expiration
    }

    /// Encode claims into a JWT token, issued now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims do not serialize to a JSON object, or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.encode_at(claims, Utc::now())
    }

    /// Encode claims into a JWT token with an explicit issue instant.
    ///
    /// Claims must not use the `iat` or `exp` field names.
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at` plus the lifetime is not a representable
    ///   instant, or [`JwtHandler::encode`] would fail
    pub fn encode_at<T: Serialize>(
        &self,
        claims: &T,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = match self.expiration {
            Some(ttl) => {
                let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
                    JwtError::EncodingFailed(format!("token lifetime {} overflows", ttl))
                })?;
                Some(expires_at.timestamp())
            }
            None => None,
        };

        let header = Header::new(self.algorithm);
        let stamped = StampedClaims {
            claims,
            iat: issued_at.timestamp(),
            exp,
        };

        encode(&header, &stamped, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// * `TokenExpired` - Expiry is enforced and `exp` is in the past
    /// * `InvalidToken` - Bad signature, algorithm mismatch, malformed token,
    ///   missing `exp` under enforced expiry, or claims of the wrong shape
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let token_data =
            decode::<T>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        if self.expiration.is_some() {
            validation.validate_exp = true;
            validation.required_spec_claims.insert("exp".to_string());
        } else {
            validation.validate_exp = false;
        }

        validation
    }
}
