//! Error handling for the AgriPredict server
//!
//! Every error body carries a stable code, an English message and the
//! catalog key the client uses to show the message in the farmer's language.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldErrors;
use thiserror::Error;

use crate::external::GenerationError;

/// The two model-backed operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOperation {
    DiseaseDetection,
    ProfitEstimation,
}

impl AiOperation {
    pub fn message_key(&self) -> &'static str {
        match self {
            AiOperation::DiseaseDetection => "errors.analysisFailed",
            AiOperation::ProfitEstimation => "errors.estimationFailed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AiOperation::DiseaseDetection => {
                "An error occurred while analyzing the image. Please try again."
            }
            AiOperation::ProfitEstimation => {
                "An error occurred while estimating profit. Please try again."
            }
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("{0}")]
    Validation(#[from] FieldErrors),

    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        message_key: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("{operation:?} failed: {source}")]
    Generation {
        operation: AiOperation,
        #[source]
        source: GenerationError,
    },

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, message_key: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            message_key: message_key.into(),
        }
    }

    pub fn generation(operation: AiOperation, source: GenerationError) -> Self {
        AppError::Generation { operation, source }
    }
}

/// Unreadable JSON body (syntax, wrong types, missing content type)
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), "errors.invalidRequest")
    }
}

/// Unreadable query string
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text(), "errors.invalidRequest")
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub message_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Please correct the highlighted fields.".to_string(),
                    message_key: "errors.validationFailed".to_string(),
                    fields: Some(fields.messages()),
                },
            ),
            AppError::BadRequest {
                message,
                message_key,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: message.clone(),
                    message_key: message_key.clone(),
                    fields: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    message_key: "errors.notFound".to_string(),
                    fields: None,
                },
            ),
            AppError::Generation { operation, source } => {
                tracing::error!(?operation, error = %source, "Model call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorDetail {
                        code: "AI_GENERATION_FAILED".to_string(),
                        message: operation.message().to_string(),
                        message_key: operation.message_key().to_string(),
                        fields: None,
                    },
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "Something went wrong. Please try again later.".to_string(),
                        message_key: "errors.internal".to_string(),
                        fields: None,
                    },
                )
            }
        };

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_is_bad_gateway() {
        let error = AppError::generation(
            AiOperation::ProfitEstimation,
            GenerationError::EmptyResponse,
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let mut fields = FieldErrors::new();
        fields.add("cropType", "validation.cropTypeRequired", "Crop type is required.");
        let response = AppError::from(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_operation_keys() {
        assert_eq!(
            AiOperation::DiseaseDetection.message_key(),
            "errors.analysisFailed"
        );
        assert_eq!(
            AiOperation::ProfitEstimation.message_key(),
            "errors.estimationFailed"
        );
    }
}
