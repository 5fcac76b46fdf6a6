use axum::http::{HeaderValue, Method, Uri, header};
use axum::{Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use genixhub_core::AppError;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::error_details::expose_error_details;
use crate::modules::auth::init_auth_router;
use crate::modules::health::init_health_router;
use crate::modules::schools::init_schools_router;
use crate::modules::students::init_students_router;
use crate::state::AppState;

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found().with_data(json!({ "path": uri.path() }))
}

pub fn init_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/health", init_health_router())
                .nest("/schools", init_schools_router())
                .nest("/students", init_students_router())
                .nest("/auth", init_auth_router(state.clone())),
        )
        .fallback(route_not_found)
        .with_state(state.clone());

    let router = if state.server_config.environment.exposes_error_details() {
        router.layer(middleware::from_fn(expose_error_details))
    } else {
        router
    };

    router
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}
