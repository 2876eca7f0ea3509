use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldIssue;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent something the validators rejected. Carries the itemized
    /// field issues for the response body.
    #[error("{error}")]
    Validation {
        error: &'static str,
        details: Vec<FieldIssue>,
    },
    /// The store failed. The caller sees only the public message; the cause
    /// goes to the operator log.
    #[error("{public}")]
    Store {
        public: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    pub fn invalid_query(details: Vec<FieldIssue>) -> Self {
        ApiError::Validation {
            error: "Invalid query parameters",
            details,
        }
    }

    pub fn invalid_payload(details: Vec<FieldIssue>) -> Self {
        ApiError::Validation {
            error: "Invalid payload",
            details,
        }
    }

    pub fn store(public: &'static str, source: sqlx::Error) -> Self {
        ApiError::Store { public, source }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation { error, details } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: error.to_string(),
                    details: Some(details),
                },
            ),
            ApiError::Store { public, source } => {
                tracing::error!(error = %source, "{public}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: public.to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
