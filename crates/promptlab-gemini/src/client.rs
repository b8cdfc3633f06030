// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Generative Language API.
//!
//! One request per call. Failures carry the upstream status so batch callers
//! can decide on backoff; this client never retries.

use std::time::Duration;

use promptlab_core::PromptlabError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

const PROVIDER: &str = "google";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client for `base_url` (e.g. `https://generativelanguage.googleapis.com`).
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, PromptlabError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                PromptlabError::Config(format!("invalid Google API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| PromptlabError::Provider {
                provider: PROVIDER.into(),
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PromptlabError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(|e| PromptlabError::Provider {
                provider: PROVIDER.into(),
                message: format!("HTTP request failed: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(|e| PromptlabError::Provider {
            provider: PROVIDER.into(),
            message: format!("failed to read response body: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.error.status {
                    Some(code) => format!("Gemini API error ({code}): {}", api_err.error.message),
                    None => format!("Gemini API error: {}", api_err.error.message),
                },
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PromptlabError::Provider {
                provider: PROVIDER.into(),
                message,
                status: Some(status.as_u16()),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| PromptlabError::Provider {
            provider: PROVIDER.into(),
            message: format!("failed to parse API response: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig, Part};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some("Hello".into()),
                }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 64,
            },
        }
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"maxOutputTokens": 64}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Hi there!"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("g-key", &format!("{}/", server.uri())).unwrap();
        let resp = client
            .generate_content("gemini-2.5-flash", &test_request())
            .await
            .unwrap();
        assert_eq!(resp.text(), "Hi there!");
    }

    #[tokio::test]
    async fn error_envelope_message_and_status_are_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "status": "INVALID_ARGUMENT", "message": "API key not valid."}
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new("bad", &server.uri()).unwrap();
        let err = client
            .generate_content("gemini-2.5-flash", &test_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key not valid."), "got: {err}");
        assert!(matches!(err, PromptlabError::Provider { status: Some(400), .. }));
    }

    #[tokio::test]
    async fn overload_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", &server.uri()).unwrap();
        let err = client
            .generate_content("gemini-2.5-pro", &test_request())
            .await
            .unwrap_err();
        assert!(err.is_overloaded());
        assert!(err.to_string().contains("overloaded"));
    }
}
