// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-completions wire types shared by every OpenAI-compatible endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,

    /// Legacy token limit, accepted by Groq and the Hugging Face router.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// OpenAI's replacement for `max_tokens`; reasoning models reject the old name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, empty when any link is missing.
    pub fn text(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone())
            .unwrap_or_default()
    }
}

/// `{"error": {...}}` envelope. Hugging Face sometimes sends `error` as a bare string.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Detailed {
        message: String,
        #[serde(default, rename = "type")]
        type_: Option<String>,
    },
    Plain(String),
}

impl ApiErrorBody {
    pub fn describe(&self) -> String {
        match self {
            ApiErrorBody::Detailed {
                message,
                type_: Some(t),
            } => format!("({t}): {message}"),
            ApiErrorBody::Detailed { message, .. } => format!(": {message}"),
            ApiErrorBody::Plain(message) => format!(": {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_token_field_is_serialized() {
        let req = ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![],
            temperature: 1.0,
            max_tokens: None,
            max_completion_tokens: Some(256),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["max_completion_tokens"], 256);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn empty_choices_yield_empty_text() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(resp.text(), "");
        let null_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(null_content.text(), "");
    }

    #[test]
    fn error_body_accepts_both_shapes() {
        let detailed: ApiErrorResponse = serde_json::from_str(
            r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#,
        )
        .unwrap();
        assert_eq!(detailed.error.describe(), "(tokens): Rate limit reached");

        let plain: ApiErrorResponse =
            serde_json::from_str(r#"{"error":"Model is loading"}"#).unwrap();
        assert_eq!(plain.error.describe(), ": Model is loading");
    }
}
