use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::OrmError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Store and internal failures are
    /// reduced to a generic line.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::OrmError(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

/// Map a unique-index violation to `Conflict`, anything else stays an ORM error.
pub fn conflict_on_unique(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::OrmError(err),
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let message = self.public_message();
        let errors = match self {
            AppError::Validation(errors) => errors,
            _ => Vec::new(),
        };

        let body = ApiResponse {
            success: false,
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                errors,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::not_found("Order").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        assert_eq!(err.public_message(), "Internal Server Error");

        let err = AppError::OrmError(DbErr::Custom("relation missing".into()));
        assert_eq!(err.public_message(), "Internal Server Error");
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(AppError::not_found("Product").public_message(), "Product not found");
    }

    #[test]
    fn non_unique_db_errors_stay_internal() {
        let err = conflict_on_unique(DbErr::Custom("other".into()), "duplicate");
        assert!(matches!(err, AppError::OrmError(_)));
    }

    #[test]
    fn into_response_sets_status() {
        let response = AppError::Forbidden("Account is banned".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
