use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use genixhub_core::{ApiResponse, AppError, PaginationParams, response::messages};
use genixhub_models::{LoginSchoolDto, RegisterSchoolDto, SchoolAuthData, SchoolListData};

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

use super::service::SchoolService;

/// Register a school and start its session
#[utoipa::path(
    post,
    path = "/api/v1/schools/register",
    request_body = RegisterSchoolDto,
    responses(
        (status = 201, description = "School registered", body = ApiResponse<SchoolAuthData>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Name or contact email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Schools"
)]
#[instrument(skip_all)]
pub async fn register_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterSchoolDto>,
) -> Result<(StatusCode, Json<ApiResponse<SchoolAuthData>>), AppError> {
    let data = SchoolService::register(state.store.as_ref(), &state.tokens, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(messages::REGISTRATION_SUCCESS, data)),
    ))
}

/// Log in as a school
#[utoipa::path(
    post,
    path = "/api/v1/schools/login",
    request_body = LoginSchoolDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<SchoolAuthData>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Schools"
)]
#[instrument(skip_all)]
pub async fn login_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginSchoolDto>,
) -> Result<Json<ApiResponse<SchoolAuthData>>, AppError> {
    let data = SchoolService::login(state.store.as_ref(), &state.tokens, dto).await?;
    Ok(Json(ApiResponse::new(messages::LOGIN_SUCCESS, data)))
}

/// List registered schools, sorted by name
#[utoipa::path(
    get,
    path = "/api/v1/schools",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of schools", body = ApiResponse<SchoolListData>),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn list_schools(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<Json<ApiResponse<SchoolListData>>, AppError> {
    let (schools, meta) = SchoolService::list(state.store.as_ref(), &params).await?;
    Ok(Json(ApiResponse::paginated(
        messages::DATA_FETCHED,
        SchoolListData { schools },
        meta,
    )))
}
