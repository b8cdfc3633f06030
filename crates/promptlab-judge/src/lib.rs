// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blind pairwise judging for Promptlab.
//!
//! [`JudgeEngine::judge`] hides which candidate came from which prompt by a
//! per-call coin flip, asks the judge model for a rubric-scored JSON report,
//! parses that report tolerantly, and maps it back to the caller's A/B frame
//! before relabelling the summary for display.
//!
//! The pieces are public so they can be exercised on their own:
//!
//! - [`blind`] - presentation order and its inverse
//! - [`rubric`] - the evaluation prompt
//! - [`parse`] - fence stripping, object extraction, string-literal repair
//! - [`terminology`] - "Output A/B" rewriting, former/latter swap, relabelling

pub mod blind;
pub mod engine;
pub mod parse;
pub mod rubric;
pub mod terminology;
pub mod types;

pub use blind::{from_blind_view, to_blind_view, BlindView, SwapPolicy};
pub use engine::JudgeEngine;
pub use parse::{parse_judge_output, repair_unescaped_control_chars_in_strings};
pub use types::{JudgeCriterion, JudgeResult};
