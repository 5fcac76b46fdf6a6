//! Application error type and its HTTP translation.
//!
//! Every controller, service, extractor and store returns [`AppError`].
//! Its [`IntoResponse`] impl is the single place where an error kind becomes
//! a status code and a sanitized `{message, data}` body.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// Client-facing messages shared by the error kinds.
pub mod messages {
    pub const VALIDATION_ERROR: &str = "Validation failed";
    pub const UNAUTHORIZED: &str = "Unauthorized access";
    pub const FORBIDDEN: &str = "Access denied";
    pub const NOT_FOUND: &str = "Resource not found";
    pub const INTERNAL_ERROR: &str = "Internal server error";
    pub const CONFLICT: &str = "Resource already exists";
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    pub const PASSWORDS_DONT_MATCH: &str = "Passwords do not match";
    pub const SCHOOL_NOT_FOUND: &str = "School not found";
    pub const INVALID_TOKEN: &str = "Invalid token";
    pub const TOKEN_EXPIRED: &str = "Token expired";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input
    Validation,
    /// Login failure; deliberately blind to which check failed
    InvalidCredentials,
    /// Missing, invalid or stale access token
    Unauthorized,
    /// Authenticated, but the role is not permitted
    Forbidden,
    NotFound,
    /// Uniqueness violation
    Conflict,
    /// A student referenced a school that does not exist
    SchoolNotFound,
    /// Refresh token with a bad signature/shape, or one that was superseded
    InvalidToken,
    /// Refresh token with a valid signature past its expiry
    TokenExpired,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Validation | Self::SchoolNotFound => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::Unauthorized
            | Self::InvalidToken
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Validation => messages::VALIDATION_ERROR,
            Self::InvalidCredentials => messages::INVALID_CREDENTIALS,
            Self::Unauthorized => messages::UNAUTHORIZED,
            Self::Forbidden => messages::FORBIDDEN,
            Self::NotFound => messages::NOT_FOUND,
            Self::Conflict => messages::CONFLICT,
            Self::SchoolNotFound => messages::SCHOOL_NOT_FOUND,
            Self::InvalidToken => messages::INVALID_TOKEN,
            Self::TokenExpired => messages::TOKEN_EXPIRED,
            Self::Internal => messages::INTERNAL_ERROR,
        }
    }
}

/// Internal error detail attached to error responses as an extension.
///
/// Never serialized by [`AppError`] itself; a development-only middleware
/// may fold it into the body.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<Value>,
    pub source: Option<Error>,
}

impl AppError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            data: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source<E>(mut self, err: E) -> Self
    where
        E: Into<Error>,
    {
        self.source = Some(err.into());
        self
    }

    /// Validation failure with a list of `{field, message}` entries.
    pub fn validation(data: Value) -> Self {
        Self::new(ErrorKind::Validation).with_data(data)
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut entry = Map::new();
        entry.insert("field".to_string(), Value::String(field.to_string()));
        entry.insert("message".to_string(), Value::String(message.into()));
        Self::validation(Value::Array(vec![Value::Object(entry)]))
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict).with_message(message)
    }

    pub fn school_not_found() -> Self {
        Self::new(ErrorKind::SchoolNotFound)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorKind::TokenExpired)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal).with_source(err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {:#}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.source.as_ref().map(|e| format!("{:#}", e));

        if status.is_server_error() {
            error!(kind = ?self.kind, error = detail.as_deref().unwrap_or(""), "{}", self.message);
        } else {
            debug!(kind = ?self.kind, error = detail.as_deref().unwrap_or(""), "{}", self.message);
        }

        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(self.message));
        if let Some(data) = self.data {
            body.insert("data".to_string(), data);
        }

        let mut response = (status, Json(Value::Object(body))).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(ErrorDetail(detail));
        }
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
