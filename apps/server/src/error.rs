// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("External API error: {0}")]
    Upstream(String),

    /// Provider payload lacks `response.holidays` or does not fit the schema.
    /// The cause is logged, never echoed to the caller.
    #[error("Invalid data structure from external API")]
    InvalidUpstreamData,

    #[error("Invalid request path: {0}")]
    InvalidPath(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timed out")]
    RequestTimeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR"),
            ApiError::Upstream(_) => (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_ERROR"),
            ApiError::InvalidUpstreamData => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_UPSTREAM_DATA")
            }
            ApiError::InvalidPath(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), code, error = %self, "Request failed");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the credential as a query parameter.
        let err = err.without_url();
        if err.is_timeout() {
            ApiError::Upstream(format!("request timed out: {}", err))
        } else {
            ApiError::Upstream(err.to_string())
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}
