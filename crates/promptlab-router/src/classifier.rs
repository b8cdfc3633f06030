// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model identifier classification.
//!
//! An ordered table of (predicate, provider) rules evaluated first-match-wins.
//! Identifiers can satisfy several rules (`google/gemini-pro` contains both
//! `gemini` and `/`), so order is part of the contract.

use promptlab_core::ProviderKind;

/// How a rule inspects the identifier.
#[derive(Debug, Clone, Copy)]
enum Predicate {
    /// Case-sensitive substring match against any needle.
    Contains(&'static [&'static str]),
    /// Case-insensitive prefix match.
    StartsWithIgnoreCase(&'static str),
}

impl Predicate {
    fn matches(self, model: &str) -> bool {
        match self {
            Predicate::Contains(needles) => needles.iter().any(|n| model.contains(n)),
            Predicate::StartsWithIgnoreCase(prefix) => model
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    predicate: Predicate,
    provider: ProviderKind,
}

const RULES: &[Rule] = &[
    Rule {
        predicate: Predicate::Contains(&["gemini"]),
        provider: ProviderKind::Google,
    },
    Rule {
        predicate: Predicate::Contains(&["llama", "mixtral"]),
        provider: ProviderKind::Groq,
    },
    Rule {
        predicate: Predicate::StartsWithIgnoreCase("gpt-"),
        provider: ProviderKind::OpenAi,
    },
    Rule {
        predicate: Predicate::Contains(&["/"]),
        provider: ProviderKind::HuggingFace,
    },
];

/// Classifies a model identifier into a provider family.
///
/// Returns `None` when no rule matches; the router decides what to do then.
pub fn classify(model: &str) -> Option<ProviderKind> {
    RULES
        .iter()
        .find(|rule| rule.predicate.matches(model))
        .map(|rule| rule.provider)
}
