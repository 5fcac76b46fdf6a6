use axum::{Json, extract::State};
use tracing::instrument;

use genixhub_core::{ApiResponse, AppError, response::messages};
use genixhub_models::{RefreshTokenRequest, TokensData};

use crate::docs::{ErrorResponse, MessageResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = ApiResponse<TokensData>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid, superseded or expired refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<TokensData>>, AppError> {
    let tokens = AuthService::refresh(state.store.as_ref(), &state.tokens, dto).await?;
    Ok(Json(ApiResponse::new(
        messages::TOKEN_REFRESHED,
        TokensData { tokens },
    )))
}

/// Invalidate the caller's refresh token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::logout(state.store.as_ref(), &auth_user).await?;
    Ok(Json(ApiResponse::message(messages::LOGOUT_SUCCESS)))
}
