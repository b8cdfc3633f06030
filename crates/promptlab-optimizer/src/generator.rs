// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response generator: runs a prompt against a model.

use std::sync::Arc;

use promptlab_config::model::GeneratorConfig;
use promptlab_core::{ChatDispatcher, ChatRequest, PromptlabError, SamplingParams};
use tracing::debug;

use crate::optimizer::non_blank;

pub struct ResponseGenerator {
    dispatcher: Arc<dyn ChatDispatcher>,
    config: GeneratorConfig,
}

impl ResponseGenerator {
    pub fn new(dispatcher: Arc<dyn ChatDispatcher>, config: GeneratorConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Model used when a call names none.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Sends `prompt` verbatim and returns the model's answer, with any
    /// reasoning trace removed for models that emit one.
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<String, PromptlabError> {
        if prompt.trim().is_empty() {
            return Err(PromptlabError::InputValidation("prompt is required".into()));
        }
        let model = non_blank(model).unwrap_or(&self.config.default_model);
        debug!(model = %model, "generating response");

        let request = ChatRequest::user_prompt(
            model,
            prompt,
            SamplingParams {
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
        )
        .with_reasoning_stripped();

        Ok(self.dispatcher.dispatch(request).await?.text)
    }
}
