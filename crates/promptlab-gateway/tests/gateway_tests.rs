// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint tests driving the router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use promptlab_config::model::{GeneratorConfig, JudgeConfig, OptimizerConfig};
use promptlab_core::{ChatDispatcher, PromptlabError};
use promptlab_gateway::{build_router, GatewayState};
use promptlab_judge::{JudgeEngine, SwapPolicy};
use promptlab_optimizer::{PromptOptimizer, ResponseGenerator};
use promptlab_test_utils::RecordingDispatcher;
use serde_json::{json, Value};
use tower::ServiceExt;

const REPORT: &str = r#"{"criteria":[{"criterionName":"Completeness & Detail","scoreA":5.0,"scoreB":7.5,"justification":"The latter goes deeper."}],"summary":"**The latter is better.**"}"#;

fn app(dispatcher: &RecordingDispatcher) -> Router {
    let shared: Arc<dyn ChatDispatcher> = Arc::new(dispatcher.clone());
    let state = GatewayState::new(
        PromptOptimizer::new(shared.clone(), OptimizerConfig::default()).unwrap(),
        ResponseGenerator::new(shared.clone(), GeneratorConfig::default()),
        JudgeEngine::new(shared, JudgeConfig::default()).with_swap_policy(SwapPolicy::Fixed(false)),
    );
    build_router(state)
}

async fn post(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn optimize_returns_the_rewritten_prompt() {
    let dispatcher = RecordingDispatcher::replying("You are a physics teacher. Explain...");
    let (status, body) = post(
        app(&dispatcher),
        "/optimize",
        r#"{"prompt": "Explain quantum computing", "strategy": "structured"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"optimizedPrompt": "You are a physics teacher. Explain..."}));
    assert_eq!(dispatcher.call_count(), 1);
}

#[tokio::test]
async fn optimize_without_prompt_is_400() {
    let dispatcher = RecordingDispatcher::replying("unused");
    let (status, body) = post(app(&dispatcher), "/optimize", r#"{"model": "gpt-4o"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "prompt is required");
    assert_eq!(dispatcher.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let dispatcher = RecordingDispatcher::replying("unused");
    let (status, body) = post(app(&dispatcher), "/generate", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn generate_returns_generated_content() {
    let dispatcher = RecordingDispatcher::replying("Qubits can be 0 and 1 at once.");
    let (status, body) = post(
        app(&dispatcher),
        "/generate",
        r#"{"prompt": "Explain quantum computing", "model": "llama-3.3-70b-versatile"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generatedContent"], "Qubits can be 0 and 1 at once.");
    assert_eq!(dispatcher.requests()[0].model, "llama-3.3-70b-versatile");
}

#[tokio::test]
async fn configuration_errors_are_500_with_the_variable_name() {
    let dispatcher = RecordingDispatcher::new(|_| {
        Err(PromptlabError::Config(
            "missing credential for openai: set the OPENAI_API_KEY environment variable".into(),
        ))
    });
    let (status, body) = post(
        app(&dispatcher),
        "/generate",
        r#"{"prompt": "hi", "model": "gpt-4o"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn judge_returns_the_report() {
    let dispatcher = RecordingDispatcher::replying(REPORT);
    let (status, body) = post(
        app(&dispatcher),
        "/judge",
        r#"{"originalPrompt": "Explain quantum computing", "outputA": "short", "outputB": "long"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["criteria"][0]["criterionName"], "Completeness & Detail");
    assert_eq!(body["criteria"][0]["scoreA"], 5.0);
    assert_eq!(body["criteria"][0]["scoreB"], 7.5);
    assert_eq!(body["summary"], "**The latter (optimized prompt) is better.**");
}

#[tokio::test]
async fn judge_missing_output_is_400() {
    let dispatcher = RecordingDispatcher::replying(REPORT);
    let (status, body) = post(
        app(&dispatcher),
        "/judge",
        r#"{"originalPrompt": "Explain quantum computing", "outputA": "short"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required fields: outputB");
    assert_eq!(dispatcher.call_count(), 0);
}

#[tokio::test]
async fn unusable_judge_output_carries_snippet() {
    let dispatcher = RecordingDispatcher::replying("Sorry, both are great!");
    let (status, body) = post(
        app(&dispatcher),
        "/judge",
        r#"{"originalPrompt": "p", "outputA": "a", "outputB": "b"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["raw_snippet"], "Sorry, both are great!");
    assert!(body["error"].as_str().unwrap().contains("unusable report"));
}

#[tokio::test]
async fn health_reports_ok() {
    let dispatcher = RecordingDispatcher::replying("unused");
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&dispatcher).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
