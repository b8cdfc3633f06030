// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use promptlab_core::PromptlabError;
use promptlab_judge::JudgeEngine;
use promptlab_optimizer::{PromptOptimizer, ResponseGenerator};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
///
/// Everything is read-only after startup; handlers never mutate it.
#[derive(Clone)]
pub struct GatewayState {
    pub optimizer: Arc<PromptOptimizer>,
    pub generator: Arc<ResponseGenerator>,
    pub judge: Arc<JudgeEngine>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(optimizer: PromptOptimizer, generator: ResponseGenerator, judge: JudgeEngine) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
            generator: Arc::new(generator),
            judge: Arc::new(judge),
            start_time: Instant::now(),
        }
    }
}

/// Builds the application router:
/// - POST /optimize
/// - POST /generate
/// - POST /judge
/// - GET /health
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/optimize", post(handlers::post_optimize))
        .route("/generate", post(handlers::post_generate))
        .route("/judge", post(handlers::post_judge))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds `host:port` and serves the gateway until the process exits.
pub async fn start_server(host: &str, port: u16, state: GatewayState) -> Result<(), PromptlabError> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PromptlabError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| PromptlabError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
