//! Page-based pagination for list endpoints.
//!
//! Query parameters are `page` (1-1000000, default 1) and `limit`
//! (1-100, default 10). Unlike a clamping scheme, out-of-range values are
//! rejected by validation so the client learns about the mistake.
//!
//! # Example
//!
//! ```ignore
//! async fn list_schools(
//!     ValidatedQuery(params): ValidatedQuery<PaginationParams>,
//! ) -> Result<Json<ApiResponse<SchoolListData>>, AppError> {
//!     let (schools, total) = store.list_schools(params.limit(), params.offset()).await?;
//!     let meta = PaginationMeta::new(params.page(), params.limit(), total);
//!     Ok(Json(ApiResponse::paginated(messages::DATA_FETCHED, SchoolListData { schools }, meta)))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const MAX_PAGE: i64 = 1_000_000;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters arrive as strings; an empty string is treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 1, max = 1_000_000, message = "Page must be between 1 and 1000000"))]
    #[param(minimum = 1, maximum = 1_000_000, example = 1)]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Number of rows to skip for the current page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page().clamp(1, MAX_PAGE) - 1).saturating_mul(self.limit().clamp(0, MAX_LIMIT))
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// { "page": 2, "limit": 10, "total": 42, "totalPages": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    /// Total number of items across all pages
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
