use serde::Serialize;
use serde_json::Value;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use genixhub_auth::{Identity, Role, TokenPair};
use genixhub_core::PaginationMeta;
use genixhub_models::{
    LoginSchoolDto, LoginStudentDto, RefreshTokenRequest, RegisterSchoolDto, RegisterStudentDto,
    SchoolAuthData, SchoolBrief, SchoolListData, SchoolProfile, SchoolSummary, StudentLoginData,
    StudentLoginProfile, StudentProfile, StudentRegisterData, TokensData,
};

use crate::modules::health::controller::HealthResponse;

/// Error envelope. `data` lists `{field, message}` entries on validation
/// failures.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Validation failed")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logout successful")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::schools::controller::register_school,
        crate::modules::schools::controller::login_school,
        crate::modules::schools::controller::list_schools,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::login_student,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout,
    ),
    components(
        schemas(
            Role,
            Identity,
            TokenPair,
            TokensData,
            RefreshTokenRequest,
            RegisterSchoolDto,
            LoginSchoolDto,
            SchoolProfile,
            SchoolSummary,
            SchoolListData,
            SchoolBrief,
            SchoolAuthData,
            RegisterStudentDto,
            LoginStudentDto,
            StudentProfile,
            StudentLoginProfile,
            StudentRegisterData,
            StudentLoginData,
            PaginationMeta,
            HealthResponse,
            ErrorResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Schools", description = "School registration, login and listing"),
        (name = "Students", description = "Student registration and login"),
        (name = "Authentication", description = "Token refresh and logout"),
    ),
    info(
        title = "Genix Hub API",
        version = "0.1.0",
        description = "Registration and authentication API for schools and their students.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/v1/health",
            "/api/v1/schools",
            "/api/v1/schools/register",
            "/api/v1/schools/login",
            "/api/v1/students/register",
            "/api/v1/students/login",
            "/api/v1/auth/refresh-token",
            "/api/v1/auth/logout",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
