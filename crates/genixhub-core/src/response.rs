//! Success envelope shared by every endpoint.

use serde::Serialize;
use utoipa::ToSchema;

use crate::pagination::PaginationMeta;

pub mod messages {
    pub const REGISTRATION_SUCCESS: &str = "Registration successful";
    pub const LOGIN_SUCCESS: &str = "Login successful";
    pub const LOGOUT_SUCCESS: &str = "Logout successful";
    pub const DATA_FETCHED: &str = "Data fetched successfully";
    pub const TOKEN_REFRESHED: &str = "Token refreshed successfully";
}

/// `{message, data?, pagination?}`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = "Data fetched successfully")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: PaginationMeta) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_only_omits_data() {
        let json = serde_json::to_value(ApiResponse::message(messages::LOGOUT_SUCCESS)).unwrap();
        assert_eq!(json, json!({"message": "Logout successful"}));
    }

    #[test]
    fn test_paginated_shape() {
        let response = ApiResponse::paginated(
            messages::DATA_FETCHED,
            vec!["a", "b"],
            PaginationMeta::new(1, 10, 2),
        );
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["data"], json!(["a", "b"]));
        assert_eq!(json["pagination"]["totalPages"], 1);
    }
}
