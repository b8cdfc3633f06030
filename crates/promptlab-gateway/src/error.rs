// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of [`PromptlabError`] onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use promptlab_core::{ErrorKind, PromptlabError};
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_snippet: Option<String>,
}

/// A handler failure. Input errors are 400, everything else 500.
#[derive(Debug)]
pub struct ApiError(pub PromptlabError);

impl From<PromptlabError> for ApiError {
    fn from(err: PromptlabError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(PromptlabError::InputValidation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InputValidation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();
        if status.is_server_error() {
            tracing::error!(kind = %kind, error = %self.0, "request failed");
        } else {
            tracing::warn!(kind = %kind, error = %self.0, "request rejected");
        }

        let body = match self.0 {
            PromptlabError::JudgeOutputFormat {
                ref message,
                ref details,
                ref raw_snippet,
            } => ErrorResponse {
                error: format!("judge returned an unusable report: {message}"),
                details: (!details.is_empty()).then(|| details.clone()),
                raw_snippet: Some(raw_snippet.clone()),
            },
            ref other => ErrorResponse {
                error: other.to_string(),
                details: None,
                raw_snippet: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
