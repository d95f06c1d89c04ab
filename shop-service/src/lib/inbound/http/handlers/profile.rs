use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let business = state.business_service.get_for_owner(&user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_verified: user.is_verified,
            joined_date: user.joined_date(),
            business_id: business.id.0,
            business_name: business.name.as_str().to_string(),
            logo: business.logo,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub joined_date: String,
    pub business_id: i64,
    pub business_name: String,
    pub logo: String,
}
