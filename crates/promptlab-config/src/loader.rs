// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./promptlab.toml` > `~/.config/promptlab/promptlab.toml` >
//! `/etc/promptlab/promptlab.toml` with environment variable overrides via `PROMPTLAB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PromptlabConfig;

pub(crate) const LOCAL_CONFIG: &str = "promptlab.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/promptlab/promptlab.toml";

/// Env key prefixes (after `PROMPTLAB_` is stripped) and the dotted path they map to.
///
/// Longer prefixes come first so `judge_terms_former` resolves to
/// `judge.terms.former` rather than `judge.terms_former`.
const SECTION_PREFIXES: &[(&str, &str)] = &[
    ("providers_google_", "providers.google."),
    ("providers_groq_", "providers.groq."),
    ("providers_openai_", "providers.openai."),
    ("providers_huggingface_", "providers.huggingface."),
    ("judge_terms_", "judge.terms."),
    ("server_", "server."),
    ("routing_", "routing."),
    ("optimizer_", "optimizer."),
    ("generator_", "generator."),
    ("judge_", "judge."),
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/promptlab/promptlab.toml` (system-wide)
/// 3. `~/.config/promptlab/promptlab.toml` (user XDG config)
/// 4. `./promptlab.toml` (local directory)
/// 5. `PROMPTLAB_*` environment variables
pub fn load_config() -> Result<PromptlabConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PromptlabConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptlabConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PromptlabConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptlabConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PromptlabConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("promptlab").join(LOCAL_CONFIG))
}

/// Environment provider with an explicit section map.
///
/// `Env::split("_")` would turn `PROMPTLAB_ROUTING_FALLBACK_MODEL` into
/// `routing.fallback.model`; the map keeps underscores inside key names.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("PROMPTLAB_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env key onto its dotted config path.
fn map_env_key(key: &str) -> String {
    for (prefix, section) in SECTION_PREFIXES {
        if let Some(rest) = key.strip_prefix(prefix) {
            return format!("{section}{rest}");
        }
    }
    key.to_string()
}
