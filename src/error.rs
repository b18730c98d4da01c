/*
 * Responsibility
 * - shared AppError for handlers and middleware
 * - IntoResponse (HTTP status + JSON error body)
 * - conversions from repo / validation / auth errors
 */
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, field_errors) = match self {
            AppError::Validation(errors) => ("Bad Request".to_string(), errors),
            AppError::BadRequest(message) => (message, Vec::new()),
            AppError::Unauthorized => ("Unauthorized".to_string(), Vec::new()),
            AppError::Forbidden => ("Forbidden".to_string(), Vec::new()),
            AppError::NotFound { resource } => (format!("{resource} not found"), Vec::new()),
            AppError::Conflict(message) => (message, Vec::new()),
            AppError::Timeout => ("Request Timeout".to_string(), Vec::new()),
            AppError::Internal => ("Internal Server Error".to_string(), Vec::new()),
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            message,
            field_errors,
        };

        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(body),
            )
                .into_response();
        }
        (status, Json(body)).into_response()
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation(vec![e])
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("resource already exists"),
            RepoError::MissingReference => {
                AppError::bad_request("referenced resource does not exist")
            }
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "database error");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let (status, body) = body_json(AppError::from(FieldError::new(
            "grade",
            "must be between 1 and 6",
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Bad Request");
        assert_eq!(body["fieldErrors"][0]["field"], "grade");
        assert_eq!(body["fieldErrors"][0]["reason"], "must be between 1 and 6");
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let res = AppError::Forbidden.into_response();
        assert!(!res.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn auth_errors_have_no_field_errors() {
        let (status, body) = body_json(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
        assert_eq!(body["message"], "Unauthorized");
        assert!(body.get("fieldErrors").is_none());

        let (status, body) = body_json(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Forbidden");
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let (status, body) = body_json(AppError::not_found("Band")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Band not found");
    }

    #[test]
    fn repo_conflict_maps_to_409() {
        let err: AppError = RepoError::Conflict.into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: AppError = RepoError::MissingReference.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
