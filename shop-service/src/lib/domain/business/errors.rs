use thiserror::Error;

/// Error for BusinessName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BusinessNameError {
    #[error("Business name must not be blank")]
    Blank,

    #[error("Business name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for business operations
#[derive(Debug, Clone, Error)]
pub enum BusinessError {
    #[error("Invalid business name: {0}")]
    InvalidName(#[from] BusinessNameError),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // Also returned when the caller does not own the business
    #[error("Business not found: {0}")]
    NotFound(String),

    #[error("Business name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
