// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Judge report types, in the wire shape the judge model is asked to emit.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One rubric dimension scored for both candidates.
///
/// Ties (`score_a == score_b`) are kept as reported; nothing is rounded or clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeCriterion {
    pub criterion_name: String,
    #[serde(deserialize_with = "lenient_score")]
    pub score_a: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub score_b: f64,
    #[serde(default)]
    pub justification: String,
}

/// The full comparison report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub criteria: Vec<JudgeCriterion>,
    pub summary: String,
}

impl JudgeResult {
    pub fn total_a(&self) -> f64 {
        self.criteria.iter().map(|c| c.score_a).sum()
    }

    pub fn total_b(&self) -> f64 {
        self.criteria.iter().map(|c| c.score_b).sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Number(f64),
    Text(String),
}

/// Accepts `7.5` as well as `"7.5"`, which judge models emit often enough.
fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match ScoreRepr::deserialize(deserializer)? {
        ScoreRepr::Number(n) => Ok(n),
        ScoreRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("score `{s}` is not a number"))),
    }
}
