// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimization strategy registry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// A prompt-rewriting technique. Each selects one instruction block.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    #[default]
    RolePlay,
    Structured,
    Cot,
    Hybrid,
    FewShot,
    ZeroShot,
}

impl StrategyId {
    /// Parses `requested`, substituting `default` when it is absent, blank or unknown.
    pub fn resolve(requested: Option<&str>, default: StrategyId) -> StrategyId {
        let Some(raw) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return default;
        };
        match StrategyId::from_str(raw) {
            Ok(id) => id,
            Err(_) => {
                warn!(requested = raw, fallback = %default, "unknown strategy, using default");
                default
            }
        }
    }

    /// The technique-specific instructions placed in the meta-prompt.
    pub fn instruction_block(self) -> &'static str {
        match self {
            StrategyId::RolePlay => ROLE_PLAY,
            StrategyId::Structured => STRUCTURED,
            StrategyId::Cot => CHAIN_OF_THOUGHT,
            StrategyId::Hybrid => HYBRID,
            StrategyId::FewShot => FEW_SHOT,
            StrategyId::ZeroShot => ZERO_SHOT,
        }
    }
}

const ROLE_PLAY: &str = "\
Technique: Role-Playing.
- Open the prompt by assigning the model a specific expert persona that fits the task \
(for example a senior copywriter, a data analyst, a patient tutor).
- Describe the persona's experience and point of view in one or two sentences.
- Keep the user's goal, constraints and audience, phrased as that expert would brief themselves.";

const STRUCTURED: &str = "\
Technique: Structured, component-based prompt.
- Rebuild the prompt from explicit components: Role, Context, Task, Constraints, Output Format.
- Put each component on its own labelled line or short paragraph.
- Make the expected output format concrete (length, sections, tables or lists).";

const CHAIN_OF_THOUGHT: &str = "\
Technique: Chain of Thought.
- Instruct the model to break the problem into steps and reason through them in order \
before giving its final answer.
- Name the intermediate steps that matter for this task.
- Ask for a clearly separated final answer after the reasoning.";

const HYBRID: &str = "\
Technique: Hybrid (persona + structure + step-by-step reasoning).
- Assign a fitting expert persona.
- Organise the prompt into Context, Task, Constraints and Output Format.
- Ask the model to work through the task step by step before writing the final output.";

const FEW_SHOT: &str = "\
Technique: Few-Shot.
- Add two or three short, concrete input/output examples that demonstrate the desired \
quality, tone and format.
- Keep the examples clearly separated from the real task and relevant to it.
- End with the user's actual request in the same shape as the examples.";

const ZERO_SHOT: &str = "\
Technique: Zero-Shot clarity.
- Do not add personas or examples.
- Make the request direct and specific: state the task, the relevant context, the \
constraints and the desired output format in plain sentences.
- Remove ambiguity without changing the user's intent.";
