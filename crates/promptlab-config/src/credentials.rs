// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider credential resolution.
//!
//! Secrets are read once at startup: a non-empty `api_key` in config wins,
//! otherwise the provider's conventional environment variable is used.
//! A missing secret is only an error when a request is routed to that provider.

use std::collections::HashMap;
use std::fmt;

use promptlab_core::{PromptlabError, ProviderKind};

use crate::model::ProvidersConfig;

/// Resolved API keys, keyed by provider family.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    keys: HashMap<ProviderKind, String>,
}

impl ProviderCredentials {
    /// Resolves keys from config, falling back to the process environment.
    pub fn resolve(config: &ProvidersConfig) -> Self {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolves keys from config, falling back to `lookup` for env vars.
    pub fn resolve_with(config: &ProvidersConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut keys = HashMap::new();
        for kind in ProviderKind::ALL {
            let configured = match kind {
                ProviderKind::Google => config.google.api_key.as_ref(),
                ProviderKind::Groq => config.groq.api_key.as_ref(),
                ProviderKind::OpenAi => config.openai.api_key.as_ref(),
                ProviderKind::HuggingFace => config.huggingface.api_key.as_ref(),
            };
            let key = configured
                .filter(|k| !k.trim().is_empty())
                .cloned()
                .or_else(|| lookup(kind.credential_env()).filter(|k| !k.trim().is_empty()));
            if let Some(key) = key {
                keys.insert(kind, key);
            }
        }
        Self { keys }
    }

    /// Builds credentials from explicit pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ProviderKind, S)>,
        S: Into<String>,
    {
        Self {
            keys: pairs.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        self.keys.get(&kind).map(String::as_str)
    }

    /// Returns the key for `kind`, or a configuration error naming the variable to set.
    pub fn require(&self, kind: ProviderKind) -> Result<&str, PromptlabError> {
        self.get(kind).ok_or_else(|| {
            PromptlabError::Config(format!(
                "missing credential for {kind}: set the {} environment variable or providers.{kind}.api_key in config",
                kind.credential_env()
            ))
        })
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut present: Vec<String> = self.keys.keys().map(|k| k.to_string()).collect();
        present.sort();
        f.debug_struct("ProviderCredentials")
            .field("present", &present)
            .finish()
    }
}
