// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing with fallback, credential gating and provider quirks.
//!
//! Per call: classify > fall back (or reject in strict mode) > check the
//! selected provider's credential > construct-or-reuse its binding > apply
//! temperature quirk > send > optionally strip the reasoning trace.

use std::sync::Arc;

use async_trait::async_trait;
use promptlab_config::model::{OpenAiConfig, PromptlabConfig, RoutingConfig};
use promptlab_config::ProviderCredentials;
use promptlab_core::{
    ChatDispatcher, ChatRequest, ChatResponse, PromptlabError, ProviderAdapter, ProviderKind,
};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::factory::{HttpProviderFactory, ProviderFactory};
use crate::reasoning::{is_reasoning_model, strip_reasoning_trace};

/// Outcome of classifying one model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Identifier the caller asked for.
    pub requested_model: String,
    /// Identifier actually sent upstream (differs only after a fallback).
    pub model: String,
    pub provider: ProviderKind,
    /// The requested identifier matched no provider pattern.
    pub fell_back: bool,
}

/// The production [`ChatDispatcher`].
///
/// Bindings are built lazily, once per provider family, and shared by all
/// later calls. A family whose credential is missing is never built.
pub struct ModelRouter {
    routing: RoutingConfig,
    fallback_provider: ProviderKind,
    fixed_temperature_models: Vec<String>,
    fixed_temperature: f32,
    credentials: ProviderCredentials,
    factory: Arc<dyn ProviderFactory>,
    bindings: [OnceCell<Arc<dyn ProviderAdapter>>; 4],
}

impl ModelRouter {
    /// Router over the real HTTP bindings described by `config`.
    pub fn from_config(
        config: &PromptlabConfig,
        credentials: ProviderCredentials,
    ) -> Result<Self, PromptlabError> {
        Self::new(
            config.routing.clone(),
            &config.providers.openai,
            credentials,
            Arc::new(HttpProviderFactory::new(config.providers.clone())),
        )
    }

    /// Fails when the configured fallback model is itself unroutable.
    pub fn new(
        routing: RoutingConfig,
        openai: &OpenAiConfig,
        credentials: ProviderCredentials,
        factory: Arc<dyn ProviderFactory>,
    ) -> Result<Self, PromptlabError> {
        let fallback_provider = classify(&routing.fallback_model).ok_or_else(|| {
            PromptlabError::Config(format!(
                "routing.fallback_model `{}` does not match any provider",
                routing.fallback_model
            ))
        })?;

        info!(
            fallback_model = %routing.fallback_model,
            fallback_provider = %fallback_provider,
            strict = routing.strict,
            credentials = ?credentials,
            "model router initialized"
        );

        Ok(Self {
            routing,
            fallback_provider,
            fixed_temperature_models: openai
                .fixed_temperature_models
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            fixed_temperature: openai.fixed_temperature,
            credentials,
            factory,
            bindings: Default::default(),
        })
    }

    /// Classifies `model`, substituting the fallback for unknown identifiers.
    ///
    /// In strict mode an unknown identifier is an input error instead.
    pub fn route(&self, model: &str) -> Result<RoutingDecision, PromptlabError> {
        if let Some(provider) = classify(model) {
            return Ok(RoutingDecision {
                requested_model: model.to_string(),
                model: model.to_string(),
                provider,
                fell_back: false,
            });
        }

        if self.routing.strict {
            return Err(PromptlabError::InputValidation(format!(
                "unknown model identifier `{model}`"
            )));
        }

        warn!(
            requested = model,
            fallback = %self.routing.fallback_model,
            "unknown model identifier, falling back to default model"
        );
        Ok(RoutingDecision {
            requested_model: model.to_string(),
            model: self.routing.fallback_model.clone(),
            provider: self.fallback_provider,
            fell_back: true,
        })
    }

    fn slot(&self, kind: ProviderKind) -> &OnceCell<Arc<dyn ProviderAdapter>> {
        let idx = match kind {
            ProviderKind::Google => 0,
            ProviderKind::Groq => 1,
            ProviderKind::OpenAi => 2,
            ProviderKind::HuggingFace => 3,
        };
        &self.bindings[idx]
    }

    async fn binding(&self, kind: ProviderKind) -> Result<Arc<dyn ProviderAdapter>, PromptlabError> {
        // Credential first: a missing secret must fail before anything is built or sent.
        let api_key = self.credentials.require(kind)?;
        let binding = self
            .slot(kind)
            .get_or_try_init(|| async { self.factory.build(kind, api_key) })
            .await?;
        Ok(Arc::clone(binding))
    }

    /// OpenAI reasoning families only accept their default temperature.
    fn requires_fixed_temperature(&self, provider: ProviderKind, model: &str) -> bool {
        if provider != ProviderKind::OpenAi {
            return false;
        }
        let model = model.to_lowercase();
        self.fixed_temperature_models
            .iter()
            .any(|prefix| model.starts_with(prefix.as_str()))
    }
}

#[async_trait]
impl ChatDispatcher for ModelRouter {
    async fn dispatch(&self, mut request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        let decision = self.route(&request.model)?;
        let binding = self.binding(decision.provider).await?;

        request.model = decision.model;
        if self.requires_fixed_temperature(decision.provider, &request.model) {
            debug!(
                model = %request.model,
                requested = request.params.temperature,
                forced = self.fixed_temperature,
                "forcing provider-required temperature"
            );
            request.params.temperature = self.fixed_temperature;
        }

        let strip = request.strip_reasoning
            && is_reasoning_model(&request.model, &self.routing.reasoning_models);
        let model = request.model.clone();

        debug!(provider = %decision.provider, model = %model, "dispatching chat request");
        let mut response = binding.complete(request).await?;

        if strip {
            response.text = strip_reasoning_trace(&response.text);
            debug!(model = %model, "reasoning trace stripped");
        }
        Ok(response)
    }
}
