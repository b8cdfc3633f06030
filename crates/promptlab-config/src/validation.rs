// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every violation rather than failing on the first one.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PromptlabConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &PromptlabConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::validation("server.host must not be empty"));
    }
    if !LOG_LEVELS.contains(&config.server.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::validation(format!(
            "server.log_level `{}` is not one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let providers = &config.providers;
    for (name, url) in [
        ("providers.google.base_url", &providers.google.base_url),
        ("providers.groq.base_url", &providers.groq.base_url),
        ("providers.openai.base_url", &providers.openai.base_url),
        ("providers.huggingface.base_url", &providers.huggingface.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "{name} `{url}` must start with http:// or https://"
            )));
        }
    }
    check_temperature(
        "providers.openai.fixed_temperature",
        providers.openai.fixed_temperature,
        &mut errors,
    );

    if config.routing.fallback_model.trim().is_empty() {
        errors.push(ConfigError::validation(
            "routing.fallback_model must not be empty",
        ));
    }

    check_temperature("optimizer.temperature", config.optimizer.temperature, &mut errors);
    check_temperature("generator.temperature", config.generator.temperature, &mut errors);
    check_temperature("judge.temperature", config.judge.temperature, &mut errors);
    for (name, value) in [
        ("optimizer.max_tokens", config.optimizer.max_tokens),
        ("generator.max_tokens", config.generator.max_tokens),
        ("judge.max_tokens", config.judge.max_tokens),
    ] {
        if value == 0 {
            errors.push(ConfigError::validation(format!("{name} must be at least 1")));
        }
    }

    let judge = &config.judge;
    if judge.criteria.is_empty() {
        errors.push(ConfigError::validation(
            "judge.criteria must contain at least one criterion",
        ));
    }
    let mut seen = HashSet::new();
    for (i, criterion) in judge.criteria.iter().enumerate() {
        if criterion.name.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "judge.criteria[{i}].name must not be empty"
            )));
        } else if !seen.insert(criterion.name.as_str()) {
            errors.push(ConfigError::validation(format!(
                "duplicate judge criterion `{}`",
                criterion.name
            )));
        }
    }

    let terms = &judge.terms;
    if terms.former.trim().is_empty() || terms.latter.trim().is_empty() {
        errors.push(ConfigError::validation(
            "judge.terms.former and judge.terms.latter must not be empty",
        ));
    } else if terms.former.eq_ignore_ascii_case(&terms.latter) {
        errors.push(ConfigError::validation(
            "judge.terms.former and judge.terms.latter must differ",
        ));
    } else if terms.former.contains(terms.latter.as_str())
        || terms.latter.contains(terms.former.as_str())
    {
        // Term swapping is substring based; one term inside the other would be rewritten twice.
        errors.push(ConfigError::validation(
            "judge.terms.former and judge.terms.latter must not contain each other",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_temperature(name: &str, value: f32, errors: &mut Vec<ConfigError>) {
    if !(0.0..=2.0).contains(&value) {
        errors.push(ConfigError::validation(format!(
            "{name} must be between 0.0 and 2.0, got {value}"
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PromptlabConfig::default()).is_ok());
    }

    #[test]
    fn out_of_range_temperature_fails() {
        let mut config = PromptlabConfig::default();
        config.judge.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "judge.temperature"));
    }

    #[test]
    fn collects_every_violation() {
        let mut config = PromptlabConfig::default();
        config.server.log_level = "loud".into();
        config.routing.fallback_model = " ".into();
        config.generator.max_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_message(&errors, "server.log_level"));
        assert!(has_message(&errors, "routing.fallback_model"));
        assert!(has_message(&errors, "generator.max_tokens"));
    }

    #[test]
    fn duplicate_criteria_fail() {
        let mut config = PromptlabConfig::default();
        let first = config.judge.criteria[0].clone();
        config.judge.criteria.push(first);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "duplicate judge criterion"));
    }

    #[test]
    fn overlapping_terms_fail() {
        let mut config = PromptlabConfig::default();
        config.judge.terms.former = "first".into();
        config.judge.terms.latter = "the first one".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "contain each other"));
    }

    #[test]
    fn base_url_needs_scheme() {
        let mut config = PromptlabConfig::default();
        config.providers.groq.base_url = "api.groq.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "providers.groq.base_url"));
    }
}
