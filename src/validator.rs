use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationErrors};

use genixhub_core::AppError;

const JSON_DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn entry(field: &str, message: impl Into<String>) -> Value {
    json!({ "field": field, "message": message.into() })
}

/// `[{field, message}]`, sorted by field so responses are stable.
pub fn format_errors(errors: &ValidationErrors) -> Value {
    let mut entries: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let field = error
                    .params
                    .get("field")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| to_camel_case(field));
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field, message)
            })
        })
        .collect();
    entries.sort();

    Value::Array(
        entries
            .into_iter()
            .map(|(field, message)| entry(&field, message))
            .collect(),
    )
}

fn json_rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::invalid_field(
            "body",
            "Missing 'Content-Type: application/json' header",
        ),
        JsonRejection::JsonSyntaxError(_) => AppError::invalid_field("body", "Malformed JSON body"),
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();

            if let Some(field) = text
                .split("missing field `")
                .nth(1)
                .and_then(|s| s.split('`').next())
            {
                return AppError::invalid_field(field, format!("{} is required", field));
            }

            // serde_path_to_error puts the offending path before the first ": "
            match text
                .strip_prefix(JSON_DATA_ERROR_PREFIX)
                .and_then(|rest| rest.split_once(": "))
                .filter(|(path, _)| !path.is_empty() && *path != "." && !path.contains(' '))
            {
                Some((path, _)) => AppError::invalid_field(path, format!("{} is invalid", path)),
                None => AppError::invalid_field("body", "Invalid field type in request"),
            }
        }
        _ => AppError::invalid_field("body", "Invalid request body"),
    }
}

/// JSON body extractor that runs `validator` rules and reports failures as
/// `400 Validation failed` with a `[{field, message}]` list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Query string counterpart of [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_field("query", "Invalid query parameters").with_source(rejection)
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(format_errors(&errors)))?;

        Ok(ValidatedQuery(value))
    }
}
