use async_trait::async_trait;

use crate::domain::business::errors::BusinessError;
use crate::domain::business::models::Business;
use crate::domain::business::models::BusinessId;
use crate::domain::business::models::UpdateBusinessCommand;
use crate::domain::user::models::UserId;

/// Port for business domain service operations.
#[async_trait]
pub trait BusinessServicePort: Send + Sync + 'static {
    /// Retrieve the business owned by a user.
    ///
    /// # Errors
    /// * `NotFound` - User owns no business
    /// * `DatabaseError` - Database operation failed
    async fn get_for_owner(&self, owner_id: &UserId) -> Result<Business, BusinessError>;

    /// Update a business on behalf of its owner.
    ///
    /// # Errors
    /// * `NotFound` - Business does not exist or is owned by someone else
    /// * `NameAlreadyExists` - New name is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_business(
        &self,
        id: &BusinessId,
        owner_id: &UserId,
        command: UpdateBusinessCommand,
    ) -> Result<Business, BusinessError>;
}

/// Persistence operations for businesses.
#[async_trait]
pub trait BusinessRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, BusinessError>;

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Business>, BusinessError>;

    /// Persist all editable fields of `business`.
    ///
    /// # Errors
    /// * `NotFound` - Business does not exist
    /// * `NameAlreadyExists` - Name is taken by another business
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, business: Business) -> Result<Business, BusinessError>;
}
