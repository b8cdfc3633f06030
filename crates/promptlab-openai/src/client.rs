// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible `/chat/completions` endpoints.

use std::time::Duration;

use promptlab_core::PromptlabError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    base_url: String,
    /// Provider label used in error messages (`groq`, `openai`, `huggingface`).
    provider: &'static str,
}

impl ChatCompletionsClient {
    pub fn new(provider: &'static str, api_key: &str, base_url: &str) -> Result<Self, PromptlabError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                PromptlabError::Config(format!("invalid {provider} API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| PromptlabError::Provider {
                provider: provider.into(),
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            provider,
        })
    }

    pub async fn create(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, PromptlabError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.error(format!("HTTP request failed: {e}"), None, Some(Box::new(e))))?;

        let status = response.status();
        debug!(
            provider = self.provider,
            status = %status,
            model = %request.model,
            "chat completion response received"
        );

        let body = response.text().await.map_err(|e| {
            self.error(
                format!("failed to read response body: {e}"),
                Some(status.as_u16()),
                Some(Box::new(e)),
            )
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("API error{}", api_err.error.describe()),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(self.error(message, Some(status.as_u16()), None));
        }

        serde_json::from_str(&body).map_err(|e| {
            self.error(
                format!("failed to parse API response: {e}"),
                Some(status.as_u16()),
                Some(Box::new(e)),
            )
        })
    }

    fn error(
        &self,
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> PromptlabError {
        PromptlabError::Provider {
            provider: self.provider.into(),
            message,
            status,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "llama-3.1-8b-instant".into(),
            messages: vec![WireMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: 0.7,
            max_tokens: Some(32),
            max_completion_tokens: None,
        }
    }

    #[tokio::test]
    async fn sends_bearer_auth_to_chat_completions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi!"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let base = format!("{}/openai/v1/", server.uri());
        let client = ChatCompletionsClient::new("groq", "gsk-test", &base).unwrap();
        let resp = client.create(&test_request()).await.unwrap();
        assert_eq!(resp.text(), "Hi!");
    }

    #[tokio::test]
    async fn rate_limit_surfaces_status_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"message": "Rate limit reached", "type": "tokens"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("groq", "k", &server.uri()).unwrap();
        let err = client.create(&test_request()).await.unwrap_err();
        assert!(err.is_overloaded());
        assert_eq!(
            err.to_string(),
            "groq provider error: API error(tokens): Rate limit reached"
        );
    }

    #[tokio::test]
    async fn unparseable_error_body_is_attached_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("huggingface", "k", &server.uri()).unwrap();
        let err = client.create(&test_request()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("502"), "got: {msg}");
        assert!(msg.contains("bad gateway"), "got: {msg}");
    }
}
