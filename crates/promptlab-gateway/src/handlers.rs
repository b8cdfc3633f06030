// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /optimize, POST /generate, POST /judge, GET /health.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use promptlab_judge::JudgeResult;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /optimize.
#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Response body for POST /optimize.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_prompt: String,
}

/// Request body for POST /generate.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Response body for POST /generate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub generated_content: String,
}

/// Request body for POST /judge.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    #[serde(default)]
    pub original_prompt: Option<String>,
    #[serde(default)]
    pub output_a: Option<String>,
    #[serde(default)]
    pub output_b: Option<String>,
    /// Judge model; the configured default when absent.
    #[serde(default)]
    pub model: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Malformed bodies are client errors, reported in the same shape as the rest.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(inner)| inner).map_err(|rejection| {
        ApiError::bad_request(format!("invalid request body: {}", rejection.body_text()))
    })
}

/// POST /optimize
pub async fn post_optimize(
    State(state): State<GatewayState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let req = body(payload)?;
    let result = state
        .optimizer
        .optimize(
            req.prompt.as_deref().unwrap_or_default(),
            req.model.as_deref(),
            req.strategy.as_deref(),
        )
        .await?;
    Ok(Json(OptimizeResponse {
        optimized_prompt: result.optimized_prompt,
    }))
}

/// POST /generate
pub async fn post_generate(
    State(state): State<GatewayState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let req = body(payload)?;
    let generated_content = state
        .generator
        .generate(req.prompt.as_deref().unwrap_or_default(), req.model.as_deref())
        .await?;
    Ok(Json(GenerateResponse { generated_content }))
}

/// POST /judge
///
/// Returns the report in the caller's A/B frame; the blind order never leaks.
pub async fn post_judge(
    State(state): State<GatewayState>,
    payload: Result<Json<JudgeRequest>, JsonRejection>,
) -> Result<Json<JudgeResult>, ApiError> {
    let req = body(payload)?;
    let result = state
        .judge
        .judge(
            req.original_prompt.as_deref().unwrap_or_default(),
            req.output_a.as_deref().unwrap_or_default(),
            req.output_b.as_deref().unwrap_or_default(),
            req.model.as_deref(),
        )
        .await?;
    Ok(Json(result))
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_request_uses_camel_case() {
        let json = r#"{"originalPrompt": "p", "outputA": "a", "outputB": "b"}"#;
        let req: JudgeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.original_prompt.as_deref(), Some("p"));
        assert_eq!(req.output_a.as_deref(), Some("a"));
        assert_eq!(req.output_b.as_deref(), Some("b"));
        assert!(req.model.is_none());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let req: OptimizeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_none());
        assert!(req.strategy.is_none());
    }

    #[test]
    fn responses_use_camel_case() {
        let json = serde_json::to_string(&OptimizeResponse {
            optimized_prompt: "x".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"optimizedPrompt":"x"}"#);
        let json = serde_json::to_string(&GenerateResponse {
            generated_content: "y".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"generatedContent":"y"}"#);
    }
}
