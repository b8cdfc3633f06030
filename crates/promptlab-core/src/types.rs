// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat types shared by the router, provider bindings and the workbench services.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Provider families the router can dispatch to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API (Gemini models).
    Google,
    /// Groq OpenAI-compatible endpoint (Llama / Mixtral models).
    Groq,
    /// OpenAI chat completions (`gpt-*` models).
    OpenAi,
    /// Hugging Face inference router (`org/model` identifiers).
    HuggingFace,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Google,
        ProviderKind::Groq,
        ProviderKind::OpenAi,
        ProviderKind::HuggingFace,
    ];

    /// Conventional environment variable holding this provider's secret.
    pub fn credential_env(self) -> &'static str {
        match self {
            ProviderKind::Google => "GOOGLE_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }
}

/// Role of a single chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Sampling parameters forwarded to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// A single-turn chat completion request, constructed per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model identifier as supplied by the caller (e.g. `gemini-2.5-flash`).
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub params: SamplingParams,
    /// Opt in to reasoning-trace stripping for models that emit one.
    pub strip_reasoning: bool,
}

impl ChatRequest {
    /// Convenience constructor for a one-message user prompt.
    pub fn user_prompt(model: impl Into<String>, prompt: impl Into<String>, params: SamplingParams) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            params,
            strip_reasoning: false,
        }
    }

    pub fn with_reasoning_stripped(mut self) -> Self {
        self.strip_reasoning = true;
        self
    }
}

/// Normalized provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

impl ChatResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_kind_round_trips_through_strings() {
        for kind in ProviderKind::ALL {
            let parsed = ProviderKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(kind, parsed);
        }
        assert_eq!(ProviderKind::HuggingFace.to_string(), "huggingface");
    }

    #[test]
    fn credential_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            ProviderKind::ALL.iter().map(|k| k.credential_env()).collect();
        assert_eq!(names.len(), ProviderKind::ALL.len());
    }

    #[test]
    fn chat_message_serializes_lowercase_role() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn user_prompt_builds_single_message() {
        let req = ChatRequest::user_prompt("gpt-4o", "hello", SamplingParams::default())
            .with_reasoning_stripped();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, ChatRole::User);
        assert!(req.strip_reasoning);
    }
}
