// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat-completions binding.
//!
//! Groq, OpenAI and the Hugging Face inference router all speak the same
//! `/chat/completions` dialect; [`CompatFlavor`] captures the few differences.

pub mod client;
pub mod types;

use async_trait::async_trait;
use promptlab_core::{ChatRequest, ChatResponse, ChatRole, PromptlabError, ProviderAdapter};
use tracing::{debug, info};

use crate::client::ChatCompletionsClient;
use crate::types::{ChatCompletionRequest, WireMessage};

/// Which OpenAI-compatible service a provider instance talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatFlavor {
    Groq,
    OpenAi,
    HuggingFace,
}

impl CompatFlavor {
    pub fn name(self) -> &'static str {
        match self {
            CompatFlavor::Groq => "groq",
            CompatFlavor::OpenAi => "openai",
            CompatFlavor::HuggingFace => "huggingface",
        }
    }

    fn uses_max_completion_tokens(self) -> bool {
        matches!(self, CompatFlavor::OpenAi)
    }
}

pub struct OpenAiCompatProvider {
    client: ChatCompletionsClient,
    flavor: CompatFlavor,
}

impl OpenAiCompatProvider {
    pub fn new(flavor: CompatFlavor, api_key: &str, base_url: &str) -> Result<Self, PromptlabError> {
        let client = ChatCompletionsClient::new(flavor.name(), api_key, base_url)?;
        info!(provider = flavor.name(), base_url, "chat-completions provider initialized");
        Ok(Self { client, flavor })
    }

    fn to_api_request(&self, request: &ChatRequest) -> ChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();

        let limit = request.params.max_tokens;
        let (max_tokens, max_completion_tokens) = if self.flavor.uses_max_completion_tokens() {
            (None, Some(limit))
        } else {
            (Some(limit), None)
        };

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.params.temperature,
            max_tokens,
            max_completion_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.flavor.name()
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        let api_request = self.to_api_request(&request);
        let response = self.client.create(&api_request).await?;
        if response.choices.is_empty() {
            debug!(provider = self.flavor.name(), model = %request.model, "no choice returned");
        }
        Ok(ChatResponse::new(response.text()))
    }
}
