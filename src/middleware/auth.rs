//! Bearer authentication.
//!
//! Every failure here, whatever the cause, answers `401 Unauthorized access`;
//! the cause is only logged at debug level.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;
use uuid::Uuid;

use genixhub_auth::{Claims, Role, extract_bearer};
use genixhub_core::AppError;

use crate::state::AppState;

/// Verified claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    /// Owning school for students, `None` for schools.
    pub fn school_id(&self) -> Option<Uuid> {
        self.0.school_id
    }
}

/// Extracts and verifies the access token, then confirms the account still
/// exists.
pub async fn authenticate_headers(state: &AppState, headers: &HeaderMap) -> Result<Claims, AppError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let result = async {
        let token = extract_bearer(header_value)?;
        let claims = state.tokens.verify_access(token)?;

        if !state.store.account_exists(claims.role, claims.user_id).await? {
            return Err(AppError::unauthorized().with_message("Account no longer exists"));
        }

        Ok(claims)
    }
    .await;

    result.map_err(|err| {
        debug!(reason = %err, "Authentication failed");
        AppError::unauthorized()
    })
}

/// Middleware that attaches [`AuthUser`] to the request extensions.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate_headers(&state, req.headers()).await {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser(claims));
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let claims = authenticate_headers(state, &parts.headers).await?;
        let user = AuthUser(claims);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
