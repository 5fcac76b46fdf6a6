//! Token issuance and verification.
//!
//! [`TokenService`] holds two HS256 key pairs built once from
//! [`JwtConfig`]: one for access tokens and one for refresh tokens. A token
//! signed with one secret never verifies with the other.
//!
//! Verification errors keep expiry apart from everything else:
//!
//! | Failure                          | Error                          |
//! |----------------------------------|--------------------------------|
//! | valid signature, past `exp`      | `TokenExpired` (`Token expired`) |
//! | bad signature, shape or claims   | `InvalidToken` (`Invalid token`) |

use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;
use uuid::Uuid;

use genixhub_config::JwtConfig;
use genixhub_core::AppError;

use crate::claims::{Claims, Identity, RefreshTokenClaims};

const BEARER_PREFIX: &str = "Bearer ";

/// `{accessToken, refreshToken}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            validation,
        }
    }

    /// Signs the same identity into an access token and a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AppError> {
        let now = Utc::now().timestamp();

        let access = Claims {
            user_id: identity.user_id,
            role: identity.role,
            school_id: identity.school_id,
            exp: expires_at(now, self.access_token_expiry),
            iat: now as usize,
        };

        let refresh = RefreshTokenClaims {
            user_id: identity.user_id,
            role: identity.role,
            school_id: identity.school_id,
            exp: expires_at(now, self.refresh_token_expiry),
            iat: now as usize,
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::default(), &access, &self.access_encoding)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))?;
        let refresh_token = encode(&Header::default(), &refresh, &self.refresh_encoding)
            .map_err(|e| {
                AppError::internal_error(format!("Failed to create refresh token: {}", e))
            })?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, &self.access_decoding)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshTokenClaims, AppError> {
        self.verify(token, &self.refresh_decoding)
    }

    fn verify<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<T, AppError> {
        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::token_expired(),
                _ => AppError::invalid_token().with_source(e),
            })
    }
}

fn expires_at(now: i64, lifetime: i64) -> usize {
    now.saturating_add(lifetime).max(0) as usize
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// # Errors
///
/// Returns `Unauthorized` when the header is missing, uses another scheme,
/// or carries an empty token.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AppError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::unauthorized)
}
