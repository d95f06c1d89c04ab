use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// OAuth2 password-flow login.
///
/// The response is the bare `{access_token, token_type}` pair that OAuth2
/// clients expect rather than the usual envelope.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let access_token = state
        .auth_service
        .issue_token(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
