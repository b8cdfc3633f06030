// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant parsing of judge-model output.
//!
//! Stages, in order: drop markdown fences, cut to the outermost `{...}`,
//! strict parse, escape raw control characters inside string literals,
//! strict parse again. Anything still unparseable is a
//! [`PromptlabError::JudgeOutputFormat`] carrying a snippet of the raw text.

use std::fmt::Write as _;

use promptlab_core::{truncate_chars, PromptlabError};
use tracing::{debug, error};

use crate::types::JudgeResult;

/// Characters of raw judge output kept in error reports.
pub const RAW_SNIPPET_CHARS: usize = 500;

/// Parses a judge model's raw answer into a report.
pub fn parse_judge_output(raw: &str) -> Result<JudgeResult, PromptlabError> {
    let unfenced = strip_code_fences(raw);
    let Some(object) = extract_object(&unfenced) else {
        return Err(format_error(
            "judge response contains no JSON object",
            String::new(),
            raw,
        ));
    };

    let strict_err = match serde_json::from_str::<JudgeResult>(object) {
        Ok(result) => return ensure_criteria(result, raw),
        Err(e) => e,
    };
    debug!(error = %strict_err, "strict parse failed, repairing string literals");

    let repaired = repair_unescaped_control_chars_in_strings(object);
    match serde_json::from_str::<JudgeResult>(&repaired) {
        Ok(result) => ensure_criteria(result, raw),
        Err(e) => Err(format_error(
            "judge response is not valid report JSON",
            format!("{e} (before repair: {strict_err})"),
            raw,
        )),
    }
}

/// Removes markdown code-fence markers (` ```json ` and ` ``` `) wherever they occur.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// The slice from the first `{` to the last `}`, if both exist in that order.
pub fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Escapes control characters that appear literally inside JSON string values.
///
/// Tracks inside-string / escaped-next / outside-string while scanning; text
/// outside string literals is copied unchanged.
pub fn repair_unescaped_control_chars_in_strings(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for ch in raw.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }

        if escaped {
            escaped = false;
            // A backslash followed by a raw line break was meant as `\n`.
            match ch {
                '\n' => out.push('n'),
                '\r' => out.push('r'),
                '\t' => out.push('t'),
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn ensure_criteria(result: JudgeResult, raw: &str) -> Result<JudgeResult, PromptlabError> {
    if result.criteria.is_empty() {
        return Err(format_error(
            "judge response has no scored criteria",
            String::new(),
            raw,
        ));
    }
    Ok(result)
}

fn format_error(message: &str, details: String, raw: &str) -> PromptlabError {
    let raw_snippet = truncate_chars(raw, RAW_SNIPPET_CHARS).to_string();
    error!(
        message,
        details = %details,
        raw_snippet = %raw_snippet,
        "failed to parse judge output"
    );
    PromptlabError::JudgeOutputFormat {
        message: message.to_string(),
        details,
        raw_snippet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"criteria":[{"criterionName":"Clarity & Structure","scoreA":6.0,"scoreB":8.0,"justification":"the latter is tidier"}],"summary":"**The latter wins.**"}"#;

    #[test]
    fn valid_json_parses_directly() {
        let result = parse_judge_output(VALID).unwrap();
        assert_eq!(result.criteria.len(), 1);
        assert_eq!(result.summary, "**The latter wins.**");
    }

    #[test]
    fn fenced_output_with_commentary_is_recovered() {
        let raw = format!("Sure! Here is my evaluation:\n```json\n{VALID}\n```\nHope this helps.");
        let result = parse_judge_output(&raw).unwrap();
        assert_eq!(result.criteria[0].score_b, 8.0);
    }

    #[test]
    fn literal_newline_inside_string_is_repaired() {
        let raw = "{\"criteria\":[{\"criterionName\":\"c\",\"scoreA\":5,\"scoreB\":7,\
                   \"justification\":\"line one\nline two\"}],\"summary\":\"**The latter.**\tDone\"}";
        let result = parse_judge_output(raw).unwrap();
        assert_eq!(result.criteria[0].justification, "line one\nline two");
        assert_eq!(result.summary, "**The latter.**\tDone");
    }

    #[test]
    fn repair_leaves_structure_and_escapes_alone() {
        let raw = "{\n  \"a\": \"x\\\"y\nz\",\n  \"b\": \"\\n\"\n}";
        let repaired = repair_unescaped_control_chars_in_strings(raw);
        assert_eq!(repaired, "{\n  \"a\": \"x\\\"y\\nz\",\n  \"b\": \"\\n\"\n}");
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["a"], "x\"y\nz");
    }

    #[test]
    fn backslash_before_raw_newline_becomes_escape() {
        let repaired = repair_unescaped_control_chars_in_strings("\"a\\\nb\"");
        assert_eq!(repaired, "\"a\\nb\"");
    }

    #[test]
    fn no_braces_is_a_format_error() {
        let err = parse_judge_output("I cannot evaluate these outputs.").unwrap_err();
        match err {
            PromptlabError::JudgeOutputFormat { raw_snippet, .. } => {
                assert_eq!(raw_snippet, "I cannot evaluate these outputs.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reversed_braces_are_a_format_error() {
        assert!(extract_object("} nothing {").is_none());
        let err = parse_judge_output("} nothing {").unwrap_err();
        assert!(matches!(err, PromptlabError::JudgeOutputFormat { .. }));
    }

    #[test]
    fn wrong_shape_reports_details() {
        let err = parse_judge_output(r#"{"verdict": "B"}"#).unwrap_err();
        match err {
            PromptlabError::JudgeOutputFormat { details, .. } => {
                assert!(details.contains("criteria"), "details: {details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_criteria_is_rejected() {
        let err = parse_judge_output(r#"{"criteria": [], "summary": "x"}"#).unwrap_err();
        assert!(matches!(err, PromptlabError::JudgeOutputFormat { .. }));
    }

    #[test]
    fn snippet_is_bounded() {
        let raw = "x".repeat(RAW_SNIPPET_CHARS * 2);
        match parse_judge_output(&raw).unwrap_err() {
            PromptlabError::JudgeOutputFormat { raw_snippet, .. } => {
                assert_eq!(raw_snippet.chars().count(), RAW_SNIPPET_CHARS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
