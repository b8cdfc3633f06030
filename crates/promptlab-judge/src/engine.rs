// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The judge pipeline: validate, blind-assign, dispatch, parse, un-swap, relabel.

use std::sync::Arc;

use promptlab_config::model::JudgeConfig;
use promptlab_core::{truncate_chars, ChatDispatcher, ChatRequest, PromptlabError, SamplingParams};
use tracing::{debug, info};

use crate::blind::{from_blind_view, to_blind_view, SwapPolicy};
use crate::parse::parse_judge_output;
use crate::rubric::build_rubric_prompt;
use crate::terminology::{neutralize_output_labels, relabel_summary};
use crate::types::JudgeResult;

/// Scores two candidate outputs for the same prompt, blind to their order.
pub struct JudgeEngine {
    dispatcher: Arc<dyn ChatDispatcher>,
    config: JudgeConfig,
    swap_policy: SwapPolicy,
}

impl JudgeEngine {
    pub fn new(dispatcher: Arc<dyn ChatDispatcher>, config: JudgeConfig) -> Self {
        Self {
            dispatcher,
            config,
            swap_policy: SwapPolicy::Random,
        }
    }

    pub fn with_swap_policy(mut self, swap_policy: SwapPolicy) -> Self {
        self.swap_policy = swap_policy;
        self
    }

    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Judges `output_a` (from the original prompt) against `output_b`
    /// (from the optimized prompt).
    ///
    /// The returned report is always in the caller's A/B frame.
    pub async fn judge(
        &self,
        original_prompt: &str,
        output_a: &str,
        output_b: &str,
        model: Option<&str>,
    ) -> Result<JudgeResult, PromptlabError> {
        validate_inputs(original_prompt, output_a, output_b)?;
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.config.default_model);

        let output_a = self.clip(output_a);
        let output_b = self.clip(output_b);
        let view = to_blind_view(output_a, output_b, self.swap_policy.draw());
        debug!(model = %model, is_swapped = view.is_swapped, "blind assignment drawn");

        let prompt = build_rubric_prompt(&self.config, original_prompt, &view);
        let request = ChatRequest::user_prompt(
            model,
            prompt,
            SamplingParams {
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
        )
        .with_reasoning_stripped();
        let raw = self.dispatcher.dispatch(request).await?.text;

        let blind = self.neutralize(parse_judge_output(&raw)?);
        let mut result = from_blind_view(view.is_swapped, blind, &self.config.terms);
        result.summary = relabel_summary(&result.summary, &self.config.terms);

        info!(
            model = %model,
            criteria = result.criteria.len(),
            total_a = result.total_a(),
            total_b = result.total_b(),
            "judgement complete"
        );
        Ok(result)
    }

    fn clip<'a>(&self, output: &'a str) -> &'a str {
        match self.config.max_candidate_chars {
            0 => output,
            max => truncate_chars(output, max),
        }
    }

    fn neutralize(&self, mut result: JudgeResult) -> JudgeResult {
        let terms = &self.config.terms;
        for c in &mut result.criteria {
            c.justification = neutralize_output_labels(&c.justification, terms);
        }
        result.summary = neutralize_output_labels(&result.summary, terms);
        result
    }
}

fn validate_inputs(original_prompt: &str, output_a: &str, output_b: &str) -> Result<(), PromptlabError> {
    let missing: Vec<&str> = [
        ("originalPrompt", original_prompt),
        ("outputA", output_a),
        ("outputB", output_b),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PromptlabError::InputValidation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
