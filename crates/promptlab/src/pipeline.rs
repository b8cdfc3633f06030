// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One orchestrated comparison: prepare two prompts, generate both answers
//! concurrently, then judge them.

use std::fmt;
use std::str::FromStr;

use promptlab_core::PromptlabError;
use promptlab_judge::JudgeResult;
use promptlab_optimizer::StrategyId;
use serde::Serialize;
use tracing::info;

use crate::retry::RetryPolicy;
use crate::workbench::Workbench;

/// How one side of a comparison gets its prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    /// The user's prompt, unchanged. No optimizer call.
    Original,
    Strategy(StrategyId),
}

impl FromStr for Arm {
    type Err = PromptlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("original") {
            return Ok(Arm::Original);
        }
        StrategyId::from_str(s)
            .map(Arm::Strategy)
            .map_err(|_| PromptlabError::InputValidation(format!("unknown strategy `{s}`")))
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Original => f.write_str("original"),
            Arm::Strategy(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub arm_a: Arm,
    pub arm_b: Arm,
    pub optimizer_model: Option<String>,
    pub generator_model: Option<String>,
    pub judge_model: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            arm_a: Arm::Original,
            arm_b: Arm::Strategy(StrategyId::default()),
            optimizer_model: None,
            generator_model: None,
            judge_model: None,
            retry: RetryPolicy::none(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub prompt: String,
    pub arm_a: String,
    pub arm_b: String,
    pub prompt_a: String,
    pub prompt_b: String,
    pub output_a: String,
    pub output_b: String,
    pub report: JudgeResult,
}

impl Workbench {
    async fn prepare(&self, prompt: &str, arm: Arm, opts: &CompareOptions) -> Result<String, PromptlabError> {
        match arm {
            Arm::Original => Ok(prompt.to_string()),
            Arm::Strategy(id) => {
                let strategy = id.to_string();
                let optimization = opts
                    .retry
                    .run("optimize", || {
                        self.optimizer
                            .optimize(prompt, opts.optimizer_model.as_deref(), Some(&strategy))
                    })
                    .await?;
                Ok(optimization.optimized_prompt)
            }
        }
    }

    async fn generate_with_retry(&self, prompt: &str, opts: &CompareOptions) -> Result<String, PromptlabError> {
        opts.retry
            .run("generate", || self.generator.generate(prompt, opts.generator_model.as_deref()))
            .await
    }

    /// Runs the full pipeline for `prompt`.
    ///
    /// The two generations share no state and run concurrently; judging
    /// waits for both.
    pub async fn compare(&self, prompt: &str, opts: &CompareOptions) -> Result<Comparison, PromptlabError> {
        if prompt.trim().is_empty() {
            return Err(PromptlabError::InputValidation("prompt is required".into()));
        }

        let (prompt_a, prompt_b) = tokio::try_join!(
            self.prepare(prompt, opts.arm_a, opts),
            self.prepare(prompt, opts.arm_b, opts),
        )?;
        let (output_a, output_b) = tokio::try_join!(
            self.generate_with_retry(&prompt_a, opts),
            self.generate_with_retry(&prompt_b, opts),
        )?;
        let report = opts
            .retry
            .run("judge", || {
                self.judge
                    .judge(prompt, &output_a, &output_b, opts.judge_model.as_deref())
            })
            .await?;

        info!(
            arm_a = %opts.arm_a,
            arm_b = %opts.arm_b,
            total_a = report.total_a(),
            total_b = report.total_b(),
            "comparison complete"
        );
        Ok(Comparison {
            prompt: prompt.to_string(),
            arm_a: opts.arm_a.to_string(),
            arm_b: opts.arm_b.to_string(),
            prompt_a,
            prompt_b,
            output_a,
            output_b,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_parse_from_cli_names() {
        assert_eq!("original".parse::<Arm>().unwrap(), Arm::Original);
        assert_eq!(
            "few-shot".parse::<Arm>().unwrap(),
            Arm::Strategy(StrategyId::FewShot)
        );
        assert!(matches!(
            "nonsense".parse::<Arm>(),
            Err(PromptlabError::InputValidation(_))
        ));
    }

    #[test]
    fn arms_display_as_their_names() {
        assert_eq!(Arm::Original.to_string(), "original");
        assert_eq!(Arm::Strategy(StrategyId::RolePlay).to_string(), "role-play");
    }
}
