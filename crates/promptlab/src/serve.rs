// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptlab serve` command implementation.

use promptlab_config::model::PromptlabConfig;
use promptlab_core::PromptlabError;
use promptlab_gateway::start_server;
use tracing::info;

use crate::workbench::Workbench;

/// Builds the production workbench and serves it until the process exits.
pub async fn run_serve(config: PromptlabConfig) -> Result<(), PromptlabError> {
    info!(
        optimizer = %config.optimizer.default_model,
        generator = %config.generator.default_model,
        judge = %config.judge.default_model,
        "starting promptlab serve"
    );
    let state = Workbench::from_config(&config)?.into_gateway_state();
    start_server(&config.server.host, config.server.port, state).await
}

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("promptlab={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
