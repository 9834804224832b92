//! Response types for the freight desk API.
//!
//! This module defines the error response structures and the mapping from
//! [`DeskError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates the response for a missing or wrong API key.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Unauthorized")
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing parameter error response.
    pub fn missing_parameter(name: &str) -> Self {
        Self::with_details(
            "MISSING_PARAMETER",
            format!("missing parameter: {}", name),
            format!("Required query parameter '{}' was not provided", name),
        )
    }

    /// Creates the generic internal error response. Never carries detail.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        json_response(self.status, self.error)
    }
}

impl From<DeskError> for ApiErrorResponse {
    fn from(error: DeskError) -> Self {
        match error {
            DeskError::InvalidReference { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_REFERENCE", error.to_string()),
            },
            DeskError::InvalidMcNumber { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_MC_NUMBER", error.to_string()),
            },
            DeskError::InsufficientSearchCriteria => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INSUFFICIENT_CRITERIA", error.to_string()),
            },
            DeskError::LoadNotFound { ref reference } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "LOAD_NOT_FOUND",
                    "Load not found by reference number",
                    format!("No load has reference number '{}'", reference),
                ),
            },
            DeskError::NoMatchingLoads => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NO_MATCHING_LOADS", error.to_string()),
            },
            DeskError::ConfigMissing { .. }
            | DeskError::ConfigInvalid { .. }
            | DeskError::DatasetNotFound { .. }
            | DeskError::DatasetParseError { .. }
            | DeskError::MissingColumn { .. }
            | DeskError::MissingReference { .. }
            | DeskError::DuplicateReference { .. }
            | DeskError::Internal { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::internal(),
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves traffic.
    pub status: String,
    /// Number of loads in the dataset.
    pub loads: usize,
    /// When the dataset was loaded.
    pub loaded_at: DateTime<Utc>,
    /// Crate version.
    pub version: String,
}

/// Builds a JSON response with an explicit content type.
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let response: ApiErrorResponse = DeskError::LoadNotFound {
            reference: "REF999".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "LOAD_NOT_FOUND");

        let response: ApiErrorResponse = DeskError::NoMatchingLoads.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_input_errors_map_to_400() {
        let response: ApiErrorResponse = DeskError::InsufficientSearchCriteria.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.error.message.contains("reference_number"));

        let response: ApiErrorResponse = DeskError::InvalidReference {
            value: "abc".to_string(),
            message: "expected an integer reference number".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_REFERENCE");
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let response: ApiErrorResponse = DeskError::Internal {
            message: "base URL /secret/path cannot be a base".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.message, "Internal server error");
        assert!(response.error.details.is_none());
    }
}
