//! Role-based authorization.
//!
//! - [`require_roles`]: layer-style check against an allowed set
//! - [`require_school`], [`require_student`], [`require_account`]: ready-made
//!   layers for `middleware::from_fn_with_state`
//! - [`check_any_role`]: the same predicate for use inside handlers

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use genixhub_auth::Role;
use genixhub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Authenticates the request (unless an earlier layer already did) and
/// rejects roles outside `allowed_roles` with `403`.
///
/// ```rust,ignore
/// let school_routes = Router::new()
///     .route("/dashboard", get(dashboard))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_school));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.contains(&auth_user.role()) {
        Ok(())
    } else {
        debug!(
            user_id = %auth_user.user_id(),
            role = %auth_user.role(),
            allowed = ?allowed_roles,
            "Role not permitted"
        );
        Err(AppError::forbidden())
    }
}

pub async fn require_school(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::School])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::Student])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Any authenticated account.
pub async fn require_account(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[Role::School, Role::Student])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genixhub_auth::Claims;
    use genixhub_core::ErrorKind;
    use uuid::Uuid;

    fn user(role: Role) -> AuthUser {
        AuthUser(Claims {
            user_id: Uuid::new_v4(),
            role,
            school_id: None,
            exp: 0,
            iat: 0,
        })
    }

    #[test]
    fn test_check_any_role() {
        assert!(check_any_role(&user(Role::School), &[Role::School]).is_ok());
        assert!(check_any_role(&user(Role::Student), &[Role::School, Role::Student]).is_ok());

        let err = check_any_role(&user(Role::Student), &[Role::School]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_empty_allowed_set_rejects_everyone() {
        assert!(check_any_role(&user(Role::School), &[]).is_err());
    }
}
