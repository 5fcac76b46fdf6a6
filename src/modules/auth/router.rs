use axum::{Router, middleware, routing::post};

use crate::middleware::auth::authenticate;
use crate::middleware::role::require_account;
use crate::state::AppState;

use super::controller::{logout, refresh_token};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let session_routes = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_account))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/refresh-token", post(refresh_token))
        .merge(session_routes)
}
