use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::business::errors::BusinessError;
use crate::domain::business::models::Business;
use crate::domain::business::models::BusinessId;
use crate::domain::business::models::UpdateBusinessCommand;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a business; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
}

impl UpdateBusinessRequest {
    fn try_into_command(self) -> Result<UpdateBusinessCommand, BusinessError> {
        UpdateBusinessCommand::new(self.name, self.city, self.region, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessData {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub region: String,
    pub description: Option<String>,
    pub logo: String,
    pub owner_id: i64,
}

impl From<&Business> for BusinessData {
    fn from(business: &Business) -> Self {
        Self {
            id: business.id.0,
            name: business.name.as_str().to_string(),
            city: business.city.clone(),
            region: business.region.clone(),
            description: business.description.clone(),
            logo: business.logo.clone(),
            owner_id: business.owner_id.0,
        }
    }
}

pub async fn update_business(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBusinessRequest>,
) -> Result<ApiSuccess<BusinessData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .business_service
        .update_business(&BusinessId(id), &user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref business| ApiSuccess::new(StatusCode::OK, business.into()))
}
