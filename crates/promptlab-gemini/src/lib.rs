// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider binding for the Promptlab workbench.
//!
//! Implements [`ProviderAdapter`] over the Generative Language
//! `generateContent` endpoint.

pub mod client;
pub mod types;

use async_trait::async_trait;
use promptlab_core::{ChatRequest, ChatResponse, ChatRole, PromptlabError, ProviderAdapter};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, PromptlabError> {
        let client = GeminiClient::new(api_key, base_url)?;
        info!(base_url, "Gemini provider initialized");
        Ok(Self { client })
    }

    /// System turns become `systemInstruction`; assistant turns use role `model`.
    fn to_api_request(request: &ChatRequest) -> GenerateContentRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for message in &request.messages {
            let part = Part {
                text: Some(message.content.clone()),
            };
            match message.role {
                ChatRole::System => system_parts.push(part),
                ChatRole::User => contents.push(Content {
                    role: Some("user".into()),
                    parts: vec![part],
                }),
                ChatRole::Assistant => contents.push(Content {
                    role: Some("model".into()),
                    parts: vec![part],
                }),
            }
        }

        GenerateContentRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then(|| Content {
                role: None,
                parts: system_parts,
            }),
            generation_config: GenerationConfig {
                temperature: request.params.temperature,
                max_output_tokens: request.params.max_tokens,
            },
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        let api_request = Self::to_api_request(&request);
        let response = self
            .client
            .generate_content(&request.model, &api_request)
            .await?;
        if response.candidates.is_empty() {
            debug!(model = %request.model, "no candidate returned, yielding empty text");
        }
        Ok(ChatResponse::new(response.text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlab_core::{ChatMessage, SamplingParams};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: String) -> GeminiProvider {
        GeminiProvider::new("test-key", &base_url).unwrap()
    }

    #[test]
    fn system_and_assistant_roles_are_mapped() {
        let request = ChatRequest {
            model: "gemini-2.5-flash".into(),
            messages: vec![
                ChatMessage::system("be brief"),
                ChatMessage::user("hi"),
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: "hello".into(),
                },
            ],
            params: SamplingParams {
                temperature: 0.2,
                max_tokens: 10,
            },
            strip_reasoning: false,
        };
        let api = GeminiProvider::to_api_request(&request);
        assert_eq!(api.contents.len(), 2);
        assert_eq!(api.contents[1].role.as_deref(), Some("model"));
        let system = api.system_instruction.unwrap();
        assert_eq!(system.parts[0].text.as_deref(), Some("be brief"));
        assert_eq!(api.generation_config.max_output_tokens, 10);
    }

    #[tokio::test]
    async fn complete_returns_normalized_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Explain"}]}],
                "generationConfig": {"temperature": 0.5}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Answer"}]}}]
            })))
            .mount(&server)
            .await;

        let request = ChatRequest::user_prompt(
            "gemini-2.5-pro",
            "Explain",
            SamplingParams {
                temperature: 0.5,
                max_tokens: 100,
            },
        );
        let response = provider(server.uri()).complete(request).await.unwrap();
        assert_eq!(response.text, "Answer");
    }

    #[tokio::test]
    async fn no_candidate_is_empty_text_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let request =
            ChatRequest::user_prompt("gemini-2.5-flash", "x", SamplingParams::default());
        let response = provider(server.uri()).complete(request).await.unwrap();
        assert_eq!(response.text, "");
    }
}
