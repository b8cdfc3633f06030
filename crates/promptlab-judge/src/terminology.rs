// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Position-neutral vocabulary handling for judge prose.

use std::sync::LazyLock;

use promptlab_config::model::TermsConfig;
use regex::{Captures, Regex};

/// The label letter must be uppercase so prose like "output a summary" is kept.
/// Boundaries are ASCII-only: CJK characters next to a label still delimit it.
static OUTPUT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(?:[Oo]utput|OUTPUT)[ \t]*([AB])(?-u:\b)").unwrap()
});

/// Private-use code points; judge models do not emit these.
const FORMER_SENTINEL: char = '\u{E000}';
const FORMER_CAP_SENTINEL: char = '\u{E001}';

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrites literal "Output A" / "Output B" into the former/latter terms.
///
/// The replacement is capitalised at the start of a sentence, a line, or bold text.
pub fn neutralize_output_labels(text: &str, terms: &TermsConfig) -> String {
    OUTPUT_LABEL
        .replace_all(text, |caps: &Captures<'_>| {
            let term = if &caps[1] == "A" {
                &terms.former
            } else {
                &terms.latter
            };
            let start = caps.get(0).map_or(0, |m| m.start());
            if starts_sentence(&text[..start]) {
                capitalize_first(term)
            } else {
                term.clone()
            }
        })
        .into_owned()
}

fn starts_sentence(before: &str) -> bool {
    let trimmed = before.trim_end_matches(|c: char| c.is_whitespace() || c == '*');
    if before[trimmed.len()..].contains('\n') {
        return true;
    }
    match trimmed.chars().last() {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?' | ':'),
    }
}

/// Exchanges the former and latter terms (plain and capitalised).
///
/// Sentinel code points stand in for the former term while the latter is
/// rewritten, so neither replacement can see the other's output.
pub fn swap_terms(text: &str, terms: &TermsConfig) -> String {
    let former = terms.former.as_str();
    let latter = terms.latter.as_str();
    let former_cap = capitalize_first(former);
    let latter_cap = capitalize_first(latter);
    let has_case = former_cap != former || latter_cap != latter;

    let mut out: String = text
        .chars()
        .filter(|c| *c != FORMER_SENTINEL && *c != FORMER_CAP_SENTINEL)
        .collect();

    out = out.replace(former, &FORMER_SENTINEL.to_string());
    if has_case {
        out = out.replace(&former_cap, &FORMER_CAP_SENTINEL.to_string());
    }
    out = out.replace(latter, former);
    if has_case {
        out = out.replace(&latter_cap, &former_cap);
    }
    out = out.replace(FORMER_SENTINEL, latter);
    if has_case {
        out = out.replace(FORMER_CAP_SENTINEL, &latter_cap);
    }
    out
}

/// Appends the display annotations after each term on the summary's first line.
///
/// Occurrences that already carry their annotation are left alone.
pub fn relabel_summary(summary: &str, terms: &TermsConfig) -> String {
    let (first, rest) = match summary.find('\n') {
        Some(idx) => summary.split_at(idx),
        None => (summary, ""),
    };

    let mut line = first.to_string();
    for (term, annotation) in [
        (terms.former.clone(), &terms.former_annotation),
        (capitalize_first(&terms.former), &terms.former_annotation),
        (terms.latter.clone(), &terms.latter_annotation),
        (capitalize_first(&terms.latter), &terms.latter_annotation),
    ] {
        line = annotate(&line, &term, annotation);
    }
    line + rest
}

fn annotate(line: &str, term: &str, annotation: &str) -> String {
    if term.is_empty() || annotation.is_empty() {
        return line.to_string();
    }
    let suffix = format!(" {annotation}");
    let mut out = String::with_capacity(line.len() + suffix.len());
    let mut cursor = 0;
    for (idx, _) in line.match_indices(term) {
        let end = idx + term.len();
        out.push_str(&line[cursor..end]);
        if !line[end..].starts_with(&suffix) {
            out.push_str(&suffix);
        }
        cursor = end;
    }
    out.push_str(&line[cursor..]);
    out
}
