use thiserror::Error;

/// Error for confirmation delivery.
///
/// Registration treats every variant as non-fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Failed to build confirmation link: {0}")]
    LinkIssuance(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to send confirmation: {0}")]
    SendFailed(String),
}
