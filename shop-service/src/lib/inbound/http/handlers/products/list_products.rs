use axum::extract::State;
use axum::http::StatusCode;

use super::ProductData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let products = state.product_service.list_products().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        products.iter().map(ProductData::from).collect(),
    ))
}
