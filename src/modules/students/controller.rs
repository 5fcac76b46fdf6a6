use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use genixhub_core::{ApiResponse, AppError, response::messages};
use genixhub_models::{LoginStudentDto, RegisterStudentDto, StudentLoginData, StudentRegisterData};

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::StudentService;

/// Register a student into an existing school
#[utoipa::path(
    post,
    path = "/api/v1/students/register",
    request_body = RegisterStudentDto,
    responses(
        (status = 201, description = "Student registered", body = ApiResponse<StudentRegisterData>),
        (status = 400, description = "Validation error or school not found", body = ErrorResponse),
        (status = 409, description = "Duplicate name, roll number, email or mobile", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn register_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentDto>,
) -> Result<(StatusCode, Json<ApiResponse<StudentRegisterData>>), AppError> {
    let data = StudentService::register(state.store.as_ref(), &state.tokens, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(messages::REGISTRATION_SUCCESS, data)),
    ))
}

/// Log in as a student
#[utoipa::path(
    post,
    path = "/api/v1/students/login",
    request_body = LoginStudentDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<StudentLoginData>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn login_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginStudentDto>,
) -> Result<Json<ApiResponse<StudentLoginData>>, AppError> {
    let data = StudentService::login(state.store.as_ref(), &state.tokens, dto).await?;
    Ok(Json(ApiResponse::new(messages::LOGIN_SUCCESS, data)))
}
