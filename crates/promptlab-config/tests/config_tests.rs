// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Promptlab configuration system.

use figment::Jail;
use promptlab_config::diagnostic::ConfigError;
use promptlab_config::model::PromptlabConfig;
use promptlab_config::{
    load_and_validate_path, load_and_validate_str, load_config, load_config_from_str,
};

/// Valid TOML with known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_promptlab_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[providers.openai]
api_key = "sk-test"
fixed_temperature_models = ["gpt-5"]

[routing]
fallback_model = "llama-3.1-8b-instant"
strict = true

[optimizer]
default_strategy = "cot"
language = "French"

[judge]
default_model = "gemini-2.5-pro"
max_candidate_chars = 500

[judge.terms]
former = "the first"
latter = "the second"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.providers.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.providers.openai.fixed_temperature_models, vec!["gpt-5"]);
    assert_eq!(config.routing.fallback_model, "llama-3.1-8b-instant");
    assert!(config.routing.strict);
    assert_eq!(config.optimizer.default_strategy, "cot");
    assert_eq!(config.optimizer.language, "French");
    assert_eq!(config.judge.max_candidate_chars, 500);
    assert_eq!(config.judge.terms.former, "the first");
    // Untouched keys in a partially specified table keep their defaults.
    assert_eq!(config.judge.terms.former_annotation, "(original prompt)");
    assert_eq!(config.judge.criteria.len(), 5);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.routing.fallback_model, "gemini-2.5-flash");
    assert!(!config.routing.strict);
    assert_eq!(config.routing.reasoning_models, vec!["deepseek-r1", "qwq"]);
    assert_eq!(
        config.providers.groq.base_url,
        "https://api.groq.com/openai/v1"
    );
    assert_eq!(config.judge.temperature, 0.5);
    assert_eq!(config.judge.max_tokens, 4096);
    assert_eq!(config.judge.max_candidate_chars, 3000);
}

#[test]
fn default_rubric_is_the_five_criteria_in_order() {
    let config = PromptlabConfig::default();
    let names: Vec<&str> = config
        .judge
        .criteria
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Completeness & Detail",
            "Adherence to Instructions",
            "Clarity & Structure",
            "Creativity & Insight",
            "Tone & Style",
        ]
    );
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let err = load_config_from_str("[agent]\nname = \"x\"\n").expect_err("should reject");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("agent"),
        "got: {err_str}"
    );
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[routing]
fallback_modle = "gpt-4o"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_suggestion = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "fallback_modle"
                && suggestion.as_deref() == Some("fallback_model")
                && valid_keys.contains("reasoning_models")
        })
    });
    assert!(has_suggestion, "got: {errors:?}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_runs_after_deserialization() {
    let toml = r#"
[judge]
temperature = 9.0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("judge.temperature"))
    ));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "prot".to_string(),
        suggestion: Some("port".to_string()),
        valid_keys: "host, port, log_level".to_string(),
        span: None,
        src: None,
    };
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `port`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("prot"));
}

#[test]
fn env_vars_override_files() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "promptlab.toml",
            r#"
[routing]
fallback_model = "from-file"

[server]
port = 4000
"#,
        )?;
        jail.set_env("PROMPTLAB_ROUTING_FALLBACK_MODEL", "from-env");
        jail.set_env("PROMPTLAB_JUDGE_TERMS_FORMER", "option one");
        jail.set_env("PROMPTLAB_PROVIDERS_OPENAI_FIXED_TEMPERATURE", "0.9");

        let config = load_config()?;
        assert_eq!(config.routing.fallback_model, "from-env");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.judge.terms.former, "option one");
        assert_eq!(config.providers.openai.fixed_temperature, 0.9);
        Ok(())
    });
}

#[test]
fn explicit_path_is_loaded_and_validated() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[generator]\nmax_tokens = 0\n")?;
        let errors = load_and_validate_path(std::path::Path::new("custom.toml"))
            .expect_err("zero max_tokens is invalid");
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("generator.max_tokens"))
        ));
        Ok(())
    });
}

#[test]
fn missing_explicit_path_is_an_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/promptlab.toml"))
        .expect_err("missing file");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
}
