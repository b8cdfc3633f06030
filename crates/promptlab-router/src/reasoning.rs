// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reasoning-trace removal for models that emit `<think>` blocks.

use std::sync::LazyLock;

use regex::Regex;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

const CLOSE_TAG: &str = "</think>";

/// Removes `<think>...</think>` blocks and trims the result.
///
/// Some hosts drop the opening tag; an orphan `</think>` means everything
/// before it was trace, so only the text after the last one is kept.
pub fn strip_reasoning_trace(text: &str) -> String {
    let without_blocks = THINK_BLOCK.replace_all(text, "");
    let answer = match without_blocks.rfind(CLOSE_TAG) {
        Some(idx) => &without_blocks[idx + CLOSE_TAG.len()..],
        None => &without_blocks[..],
    };
    answer.trim().to_string()
}

/// True when `model` contains any of `patterns`, ignoring case.
pub fn is_reasoning_model(model: &str, patterns: &[String]) -> bool {
    let model = model.to_lowercase();
    patterns
        .iter()
        .any(|p| !p.is_empty() && model.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_leading_block() {
        let raw = "<think>\nLet me plan.\nStep 1...\n</think>\n\nFinal answer.";
        assert_eq!(strip_reasoning_trace(raw), "Final answer.");
    }

    #[test]
    fn removes_every_block() {
        let raw = "<think>a</think>Hello <think>b</think>world";
        assert_eq!(strip_reasoning_trace(raw), "Hello world");
    }

    #[test]
    fn orphan_close_tag_drops_prefix() {
        let raw = "reasoning without an opener</think>The answer";
        assert_eq!(strip_reasoning_trace(raw), "The answer");
    }

    #[test]
    fn text_without_markers_is_only_trimmed() {
        assert_eq!(strip_reasoning_trace("  plain  "), "plain");
    }

    #[test]
    fn reasoning_model_match_ignores_case() {
        let patterns = vec!["deepseek-r1".to_string(), "qwq".to_string()];
        assert!(is_reasoning_model("deepseek-ai/DeepSeek-R1-Distill-Llama-70B", &patterns));
        assert!(is_reasoning_model("Qwen/QwQ-32B", &patterns));
        assert!(!is_reasoning_model("gpt-4o", &patterns));
        assert!(!is_reasoning_model("anything", &[String::new()]));
    }
}
