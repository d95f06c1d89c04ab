use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::product::models::ProductId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .product_service
        .delete_product(&ProductId(id), &user.id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: format!("Product {} deleted", id),
        },
    ))
}
