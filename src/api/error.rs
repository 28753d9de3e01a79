// src/api/error.rs
//
// HTTP error envelope. Every error response carries the same JSON body:
// {statusCode, timestamp, path, method, message}. Handlers return
// AppError; the envelope middleware rebuilds the body so path and method
// are always present.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
    pub method: String,
    pub message: String,
}

/// Carried through response extensions from `IntoResponse` to the
/// envelope middleware, which knows the request path and method.
#[derive(Debug, Clone)]
pub(crate) struct ErrorMessage(pub String);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failure details stay out of the response body
        let message = match &self {
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}

/// Rebuild error responses into the JSON envelope and log them.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    let Some(ErrorMessage(message)) = response.extensions().get::<ErrorMessage>().cloned() else {
        return response;
    };

    error!("{} {} {}: {}", method, path, status.as_u16(), message);

    let body = ErrorBody {
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        path,
        method: method.to_string(),
        message,
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::UpstreamFetch("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Other("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_masked() {
        let response = AppError::Pool("connection pool exhausted".into()).into_response();
        let ErrorMessage(message) = response.extensions().get::<ErrorMessage>().unwrap().clone();
        assert_eq!(message, "Internal server error");

        let response = AppError::NotFound("Pokemon with ID x not found".into()).into_response();
        let ErrorMessage(message) = response.extensions().get::<ErrorMessage>().unwrap().clone();
        assert_eq!(message, "Pokemon with ID x not found");
    }
}
