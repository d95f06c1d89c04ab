use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ProductData;
use super::ProductRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let input = req.try_into_input()?;

    state
        .product_service
        .create_product(&user.id, input)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}
