use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing, empty, or outside its allowed values
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    /// A storage-level unique constraint rejected the write
    #[error("{0}")]
    Duplicate(String),

    /// Record not found
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation { field, message } => json!({
                "success": false,
                "message": "Validation failed",
                "errors": { (*field): [message] }
            }),
            AppError::Duplicate(message) => json!({
                "success": false,
                "message": message
            }),
            AppError::NotFound(what) => json!({
                "success": false,
                "message": format!("{what} not found")
            }),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                json!({
                    "success": false,
                    "message": "Internal Server Error"
                })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::validation("status", "Status must be either Present or Absent");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Status must be either Present or Absent");
    }

    #[test]
    fn duplicate_maps_to_conflict() {
        let err = AppError::Duplicate("Attendance for this employee on this date already exists".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
