//! Development-only error detail exposure.
//!
//! [`AppError`](genixhub_core::AppError) never serializes its source. It
//! attaches an [`ErrorDetail`] extension instead, which this middleware folds
//! into the JSON body as `error`. Mount it only outside production.

use axum::{
    body::Body,
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use serde_json::Value;

use genixhub_core::ErrorDetail;

pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return (parts, Body::empty()).into_response(),
    };

    let mut json = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        _ => return Response::from_parts(parts, Body::from(bytes)),
    };
    json.insert("error".to_string(), Value::String(detail));

    let body = match serde_json::to_vec(&Value::Object(json)) {
        Ok(body) => body,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}
