// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Promptlab workbench.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Promptlab configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptlabConfig {
    /// HTTP server and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Per-provider credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Prompt optimizer settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Response generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Judge engine settings.
    #[serde(default)]
    pub judge: JudgeConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Credentials and endpoints for every provider family.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default = "default_google")]
    pub google: ProviderEndpoint,

    #[serde(default = "default_groq")]
    pub groq: ProviderEndpoint,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default = "default_huggingface")]
    pub huggingface: ProviderEndpoint,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            google: default_google(),
            groq: default_groq(),
            openai: OpenAiConfig::default(),
            huggingface: default_huggingface(),
        }
    }
}

/// A provider's API key and base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEndpoint {
    /// API key. `None` falls back to the provider's conventional env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the provider API.
    pub base_url: String,
}

fn default_google() -> ProviderEndpoint {
    ProviderEndpoint {
        api_key: None,
        base_url: "https://generativelanguage.googleapis.com".to_string(),
    }
}

fn default_groq() -> ProviderEndpoint {
    ProviderEndpoint {
        api_key: None,
        base_url: "https://api.groq.com/openai/v1".to_string(),
    }
}

fn default_huggingface() -> ProviderEndpoint {
    ProviderEndpoint {
        api_key: None,
        base_url: "https://router.huggingface.co/v1".to_string(),
    }
}

/// OpenAI settings, including the fixed-temperature model list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model name prefixes (case-insensitive) that only accept the provider's default temperature.
    #[serde(default = "default_fixed_temperature_models")]
    pub fixed_temperature_models: Vec<String>,

    /// Temperature forced for `fixed_temperature_models`.
    #[serde(default = "default_fixed_temperature")]
    pub fixed_temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            fixed_temperature_models: default_fixed_temperature_models(),
            fixed_temperature: default_fixed_temperature(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_fixed_temperature_models() -> Vec<String> {
    vec!["gpt-5".to_string()]
}

fn default_fixed_temperature() -> f32 {
    1.0
}

/// Model routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model substituted for identifiers that match no provider pattern.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Reject unknown identifiers instead of falling back.
    #[serde(default)]
    pub strict: bool,

    /// Case-insensitive model substrings whose reasoning traces may be stripped.
    #[serde(default = "default_reasoning_models")]
    pub reasoning_models: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            fallback_model: default_fallback_model(),
            strict: false,
            reasoning_models: default_reasoning_models(),
        }
    }
}

fn default_fallback_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_reasoning_models() -> Vec<String> {
    vec!["deepseek-r1".to_string(), "qwq".to_string()]
}

/// Prompt optimizer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerConfig {
    #[serde(default = "default_fallback_model")]
    pub default_model: String,

    /// Strategy used when the request names none or an unknown one.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    #[serde(default = "default_generation_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Language the optimized prompt should request unless the user specified one.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_model: default_fallback_model(),
            default_strategy: default_strategy(),
            temperature: default_generation_temperature(),
            max_tokens: default_max_tokens(),
            language: default_language(),
        }
    }
}

fn default_strategy() -> String {
    "role-play".to_string()
}

fn default_generation_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_language() -> String {
    "English".to_string()
}

/// Response generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "default_fallback_model")]
    pub default_model: String,

    #[serde(default = "default_generation_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_model: default_fallback_model(),
            temperature: default_generation_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Judge engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JudgeConfig {
    #[serde(default = "default_judge_model")]
    pub default_model: String,

    #[serde(default = "default_judge_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Candidate outputs are cut to this many characters. 0 disables the cut.
    #[serde(default = "default_max_candidate_chars")]
    pub max_candidate_chars: usize,

    /// Language the judge writes its prose in.
    #[serde(default = "default_language")]
    pub language: String,

    /// Rubric dimensions, in report order.
    #[serde(default = "default_criteria")]
    pub criteria: Vec<CriterionConfig>,

    /// Position-neutral vocabulary and display annotations.
    #[serde(default)]
    pub terms: TermsConfig,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            default_model: default_judge_model(),
            temperature: default_judge_temperature(),
            max_tokens: default_max_tokens(),
            max_candidate_chars: default_max_candidate_chars(),
            language: default_language(),
            criteria: default_criteria(),
            terms: TermsConfig::default(),
        }
    }
}

fn default_judge_model() -> String {
    "Qwen/Qwen2.5-72B-Instruct".to_string()
}

fn default_judge_temperature() -> f32 {
    0.5
}

fn default_max_candidate_chars() -> usize {
    3000
}

/// One rubric dimension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CriterionConfig {
    pub name: String,
    pub description: String,
}

fn criterion(name: &str, description: &str) -> CriterionConfig {
    CriterionConfig {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn default_criteria() -> Vec<CriterionConfig> {
    vec![
        criterion(
            "Completeness & Detail",
            "How comprehensive and detailed is the output?",
        ),
        criterion(
            "Adherence to Instructions",
            "How well does the output follow the user's original request?",
        ),
        criterion(
            "Clarity & Structure",
            "How clear, well-organized, and easy to read is the output?",
        ),
        criterion(
            "Creativity & Insight",
            "Does the output offer creative or insightful perspectives?",
        ),
        criterion(
            "Tone & Style",
            "Is the tone and style appropriate for the request and its audience?",
        ),
    ]
}

/// Position-neutral terms the judge must use, and the labels shown to users.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TermsConfig {
    /// Term for the first candidate (e.g. "the former").
    #[serde(default = "default_former")]
    pub former: String,

    /// Term for the second candidate (e.g. "the latter").
    #[serde(default = "default_latter")]
    pub latter: String,

    /// Appended after the former term on the summary's first line.
    #[serde(default = "default_former_annotation")]
    pub former_annotation: String,

    /// Appended after the latter term on the summary's first line.
    #[serde(default = "default_latter_annotation")]
    pub latter_annotation: String,
}

impl Default for TermsConfig {
    fn default() -> Self {
        Self {
            former: default_former(),
            latter: default_latter(),
            former_annotation: default_former_annotation(),
            latter_annotation: default_latter_annotation(),
        }
    }
}

fn default_former() -> String {
    "the former".to_string()
}

fn default_latter() -> String {
    "the latter".to_string()
}

fn default_former_annotation() -> String {
    "(original prompt)".to_string()
}

fn default_latter_annotation() -> String {
    "(optimized prompt)".to_string()
}
