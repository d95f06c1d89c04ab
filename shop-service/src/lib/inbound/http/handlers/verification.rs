use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::verification::models::VerificationResult;
use crate::inbound::http::router::AppState;

pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerificationQuery>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let token = query
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing verification token".to_string()))?;

    let message = match state.verification_gate.confirm(&token).await? {
        VerificationResult::Verified(username) => {
            format!("Hello {}, your account has been verified", username)
        }
        VerificationResult::AlreadyVerified => "Account already verified".to_string(),
    };

    Ok(ApiSuccess::new(StatusCode::OK, MessageData { message }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationQuery {
    token: Option<String>,
}
