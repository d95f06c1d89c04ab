use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::business::errors::BusinessError;
use crate::domain::business::models::Business;
use crate::domain::business::models::BusinessId;
use crate::domain::business::models::UpdateBusinessCommand;
use crate::domain::business::ports::BusinessRepository;
use crate::domain::business::ports::BusinessServicePort;
use crate::domain::user::models::UserId;

pub struct BusinessService<BR>
where
    BR: BusinessRepository,
{
    repository: Arc<BR>,
}

impl<BR> BusinessService<BR>
where
    BR: BusinessRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BusinessServicePort for BusinessService<BR>
where
    BR: BusinessRepository,
{
    async fn get_for_owner(&self, owner_id: &UserId) -> Result<Business, BusinessError> {
        self.repository
            .find_by_owner(owner_id)
            .await?
            .ok_or(BusinessError::NotFound(format!("owner {}", owner_id)))
    }

    async fn update_business(
        &self,
        id: &BusinessId,
        owner_id: &UserId,
        command: UpdateBusinessCommand,
    ) -> Result<Business, BusinessError> {
        let mut business = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|business| business.is_owned_by(owner_id))
            .ok_or_else(|| {
                tracing::warn!(business_id = %id, user_id = %owner_id, "Business update refused");
                BusinessError::NotFound(id.to_string())
            })?;

        business.apply(command);

        let updated = self.repository.update(business).await?;
        tracing::info!(business_id = %updated.id, "Business updated");
        Ok(updated)
    }
}
