// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blind A/B assignment and its inverse.

use promptlab_config::model::TermsConfig;

use crate::terminology::swap_terms;
use crate::types::JudgeResult;

/// How the presentation order is chosen for each judge call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapPolicy {
    /// Unbiased coin flip per call.
    #[default]
    Random,
    /// Always the given value. Used by tests and reproducible runs.
    Fixed(bool),
}

impl SwapPolicy {
    pub fn draw(self) -> bool {
        match self {
            SwapPolicy::Random => rand::random::<bool>(),
            SwapPolicy::Fixed(swapped) => swapped,
        }
    }
}

/// What the judge model sees as "Output A" and "Output B".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindView<'a> {
    pub is_swapped: bool,
    pub displayed_a: &'a str,
    pub displayed_b: &'a str,
}

pub fn to_blind_view<'a>(output_a: &'a str, output_b: &'a str, is_swapped: bool) -> BlindView<'a> {
    if is_swapped {
        BlindView {
            is_swapped,
            displayed_a: output_b,
            displayed_b: output_a,
        }
    } else {
        BlindView {
            is_swapped,
            displayed_a: output_a,
            displayed_b: output_b,
        }
    }
}

/// Maps a report written in the blind frame back to the caller's A/B frame.
///
/// When swapped, every score pair is exchanged and the former/latter terms in
/// all prose are exchanged. Otherwise the report is returned unchanged.
pub fn from_blind_view(is_swapped: bool, result: JudgeResult, terms: &TermsConfig) -> JudgeResult {
    if !is_swapped {
        return result;
    }
    JudgeResult {
        criteria: result
            .criteria
            .into_iter()
            .map(|mut c| {
                std::mem::swap(&mut c.score_a, &mut c.score_b);
                c.justification = swap_terms(&c.justification, terms);
                c
            })
            .collect(),
        summary: swap_terms(&result.summary, terms),
    }
}
