// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction of provider bindings.

use std::sync::Arc;

use promptlab_config::model::ProvidersConfig;
use promptlab_core::{PromptlabError, ProviderAdapter, ProviderKind};
use promptlab_gemini::GeminiProvider;
use promptlab_openai::{CompatFlavor, OpenAiCompatProvider};

/// Builds the binding for one provider family given its resolved secret.
///
/// The router calls this at most once per family, on first use.
pub trait ProviderFactory: Send + Sync {
    fn build(
        &self,
        kind: ProviderKind,
        api_key: &str,
    ) -> Result<Arc<dyn ProviderAdapter>, PromptlabError>;
}

/// Builds the real HTTP bindings from the `[providers]` config section.
pub struct HttpProviderFactory {
    providers: ProvidersConfig,
}

impl HttpProviderFactory {
    pub fn new(providers: ProvidersConfig) -> Self {
        Self { providers }
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn build(
        &self,
        kind: ProviderKind,
        api_key: &str,
    ) -> Result<Arc<dyn ProviderAdapter>, PromptlabError> {
        let p = &self.providers;
        let provider: Arc<dyn ProviderAdapter> = match kind {
            ProviderKind::Google => Arc::new(GeminiProvider::new(api_key, &p.google.base_url)?),
            ProviderKind::Groq => Arc::new(OpenAiCompatProvider::new(
                CompatFlavor::Groq,
                api_key,
                &p.groq.base_url,
            )?),
            ProviderKind::OpenAi => Arc::new(OpenAiCompatProvider::new(
                CompatFlavor::OpenAi,
                api_key,
                &p.openai.base_url,
            )?),
            ProviderKind::HuggingFace => Arc::new(OpenAiCompatProvider::new(
                CompatFlavor::HuggingFace,
                api_key,
                &p.huggingface.base_url,
            )?),
        };
        Ok(provider)
    }
}
