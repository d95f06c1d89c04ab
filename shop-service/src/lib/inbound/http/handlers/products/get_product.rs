use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ProductData;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::inbound::http::handlers::business::BusinessData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<ProductDetailsData>, ApiError> {
    state
        .product_service
        .get_product_details(&ProductId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetailsData {
    pub product: ProductData,
    pub business: BusinessData,
    pub owner: OwnerData,
}

/// Public view of the seller; credentials and verification state stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerData {
    pub id: i64,
    pub email: String,
    pub joined_date: String,
}

impl From<&ProductDetails> for ProductDetailsData {
    fn from(details: &ProductDetails) -> Self {
        Self {
            product: (&details.product).into(),
            business: (&details.business).into(),
            owner: OwnerData {
                id: details.owner.id.0,
                email: details.owner.email.as_str().to_string(),
                joined_date: details.owner.joined_date(),
            },
        }
    }
}
