// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM provider bindings (Gemini, Groq, OpenAI, Hugging Face).

use async_trait::async_trait;

use crate::error::PromptlabError;
use crate::types::{ChatRequest, ChatResponse};

/// One provider binding.
///
/// Implementations normalize their provider's response envelope into
/// [`ChatResponse::text`] and never retry.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this provider binding.
    fn name(&self) -> &str;

    /// Sends a single-turn completion request and returns the full text.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError>;
}
