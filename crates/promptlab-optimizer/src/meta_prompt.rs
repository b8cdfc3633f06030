// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta-prompt assembly for the optimizer.

use crate::strategy::StrategyId;

const PREAMBLE: &str = "\
You are a world-class prompt engineer. Your task is to rewrite the user's prompt below \
so that a large language model will produce a clearly better answer to it. Keep the \
user's intent, subject and any explicit requirements intact.";

/// Builds the single user message sent to the optimizer model.
///
/// The user's prompt is embedded as quoted data, never as instructions.
pub fn build_meta_prompt(strategy: StrategyId, user_prompt: &str, language: &str) -> String {
    format!(
        "{PREAMBLE}\n\n\
         {block}\n\n\
         Rules for your answer:\n\
         - Write the optimized prompt in {language} unless the original prompt asks for another language.\n\
         - Do not leave placeholder text such as [topic] or <insert here>; fill in concrete content.\n\
         - Do not wrap list items in markdown bold.\n\
         - Return only the new prompt, ready to be sent to a model as-is.\n\
         - Do not add explanations, headings about what you changed, or any other commentary.\n\n\
         Original prompt:\n\"\"\"\n{user_prompt}\n\"\"\"\n\n\
         Optimized prompt:",
        block = strategy.instruction_block(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_block_prompt_and_language() {
        let prompt = build_meta_prompt(StrategyId::FewShot, "Write a haiku about rust", "German");
        assert!(prompt.contains(StrategyId::FewShot.instruction_block()));
        assert!(prompt.contains("\"\"\"\nWrite a haiku about rust\n\"\"\""));
        assert!(prompt.contains("in German"));
        assert!(prompt.trim_end().ends_with("Optimized prompt:"));
    }

    #[test]
    fn other_strategies_are_absent() {
        let prompt = build_meta_prompt(StrategyId::Cot, "x", "English");
        assert!(!prompt.contains(StrategyId::RolePlay.instruction_block()));
    }
}
