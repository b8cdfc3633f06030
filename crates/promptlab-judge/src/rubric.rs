// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rubric meta-prompt for the judge model.

use std::fmt::Write as _;

use promptlab_config::model::JudgeConfig;
use serde_json::Value;

use crate::blind::BlindView;
use crate::terminology::capitalize_first;

/// Builds the evaluation prompt for one blind pair.
///
/// Candidates are labelled "Output A" and "Output B" in presentation order;
/// the judge is told to refer to them only by the position-neutral terms.
pub fn build_rubric_prompt(config: &JudgeConfig, original_prompt: &str, view: &BlindView<'_>) -> String {
    let terms = &config.terms;
    let former = &terms.former;
    let latter = &terms.latter;
    let former_cap = capitalize_first(former);
    let latter_cap = capitalize_first(latter);

    let mut criteria = String::new();
    for (i, c) in config.criteria.iter().enumerate() {
        let _ = writeln!(criteria, "{}. {}: {}", i + 1, c.name, c.description);
    }

    let mut example = String::from("{\n  \"criteria\": [\n");
    for (i, c) in config.criteria.iter().enumerate() {
        let sep = if i + 1 == config.criteria.len() { "" } else { "," };
        let _ = writeln!(
            example,
            "    {{\"criterionName\": {}, \"scoreA\": <1.0-10.0>, \"scoreB\": <1.0-10.0>, \
             \"justification\": \"<reasoning that mentions {former} and {latter}>\"}}{sep}",
            Value::String(c.name.clone()),
        );
    }
    let _ = write!(
        example,
        "  ],\n  \"summary\": \"**<winner declaration>**\\n<overall comparison>\"\n}}"
    );

    let language = &config.language;
    format!(
        "You are a meticulous and impartial evaluator of language model outputs. \
         Two outputs were produced for the same user prompt. Score each of them on every \
         criterion below and explain your reasoning.\n\n\
         User prompt:\n\"\"\"\n{original_prompt}\n\"\"\"\n\n\
         Output A:\n\"\"\"\n{a}\n\"\"\"\n\n\
         Output B:\n\"\"\"\n{b}\n\"\"\"\n\n\
         Criteria:\n{criteria}\n\
         Scoring rules:\n\
         - Give each output a score from 1.0 to 10.0 with exactly one decimal place.\n\
         - For every criterion the two scores must differ. Ties are not allowed.\n\
         - Judge only the content that was produced. Outputs may have been cut off; \
         do not penalize apparent truncation.\n\
         - Do not favor an output for being longer.\n\n\
         Writing rules:\n\
         - Write every justification and the summary in {language}.\n\
         - Never write \"Output A\" or \"Output B\". Call Output A \"{former}\" and \
         Output B \"{latter}\".\n\
         - The first line of the summary must declare the winner in bold, for example \
         \"**{former_cap} is better overall.**\" or \"**{latter_cap} is better overall.**\", \
         before any other explanation.\n\n\
         Respond with a single raw JSON object and nothing else. Do not use code fences \
         and do not add commentary before or after it. Use exactly this structure, with \
         the criteria in the order listed:\n{example}\n",
        a = view.displayed_a,
        b = view.displayed_b,
    )
}
