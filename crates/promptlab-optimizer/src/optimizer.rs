// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt optimizer: strategy-driven rewrite of a user prompt.

use std::str::FromStr;
use std::sync::Arc;

use promptlab_config::model::OptimizerConfig;
use promptlab_core::{ChatDispatcher, ChatRequest, PromptlabError, SamplingParams};
use serde::Serialize;
use tracing::{debug, info};

use crate::meta_prompt::build_meta_prompt;
use crate::strategy::StrategyId;

/// The rewritten prompt plus the choices that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub optimized_prompt: String,
    pub strategy: StrategyId,
    pub model: String,
}

/// Rewrites prompts through any [`ChatDispatcher`].
pub struct PromptOptimizer {
    dispatcher: Arc<dyn ChatDispatcher>,
    config: OptimizerConfig,
    default_strategy: StrategyId,
}

impl PromptOptimizer {
    /// Fails when `config.default_strategy` is not a known strategy id.
    pub fn new(
        dispatcher: Arc<dyn ChatDispatcher>,
        config: OptimizerConfig,
    ) -> Result<Self, PromptlabError> {
        let default_strategy = StrategyId::from_str(&config.default_strategy).map_err(|_| {
            PromptlabError::Config(format!(
                "optimizer.default_strategy `{}` is not a known strategy",
                config.default_strategy
            ))
        })?;
        Ok(Self {
            dispatcher,
            config,
            default_strategy,
        })
    }

    pub fn default_strategy(&self) -> StrategyId {
        self.default_strategy
    }

    /// Rewrites `prompt`. Absent `model`/`strategy` use the configured defaults;
    /// an unknown strategy falls back to the default with a warning.
    pub async fn optimize(
        &self,
        prompt: &str,
        model: Option<&str>,
        strategy: Option<&str>,
    ) -> Result<Optimization, PromptlabError> {
        if prompt.trim().is_empty() {
            return Err(PromptlabError::InputValidation("prompt is required".into()));
        }

        let strategy = StrategyId::resolve(strategy, self.default_strategy);
        let model = non_blank(model).unwrap_or(&self.config.default_model).to_string();
        let meta_prompt = build_meta_prompt(strategy, prompt, &self.config.language);

        debug!(model = %model, strategy = %strategy, "optimizing prompt");
        let request = ChatRequest::user_prompt(
            model.clone(),
            meta_prompt,
            SamplingParams {
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
        )
        .with_reasoning_stripped();

        let response = self.dispatcher.dispatch(request).await?;
        let optimized_prompt = response.text.trim().to_string();
        info!(
            model = %model,
            strategy = %strategy,
            chars = optimized_prompt.chars().count(),
            "prompt optimized"
        );

        Ok(Optimization {
            optimized_prompt,
            strategy,
            model,
        })
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
