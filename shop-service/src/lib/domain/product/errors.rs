use thiserror::Error;

use crate::domain::business::errors::BusinessError;
use crate::user::errors::UserError;

/// Top-level error for product operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // Also returned when the caller does not own the product
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("No business registered for user {0}")]
    NoBusiness(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<BusinessError> for ProductError {
    fn from(err: BusinessError) -> Self {
        ProductError::DatabaseError(err.to_string())
    }
}

impl From<UserError> for ProductError {
    fn from(err: UserError) -> Self {
        ProductError::DatabaseError(err.to_string())
    }
}
