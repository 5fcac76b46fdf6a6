use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use genixhub_auth::TokenPair;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokensData {
    pub tokens: TokenPair,
}
