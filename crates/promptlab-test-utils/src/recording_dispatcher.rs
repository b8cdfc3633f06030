// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A `ChatDispatcher` stub that records requests and answers via a closure.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use promptlab_core::{ChatDispatcher, ChatRequest, ChatResponse, PromptlabError};

type Responder = dyn Fn(&ChatRequest) -> Result<String, PromptlabError> + Send + Sync;

/// Records every dispatched [`ChatRequest`] and answers with a caller-supplied function.
///
/// Use it in place of the model router to assert what the optimizer, generator
/// or judge sent, and how many times.
#[derive(Clone)]
pub struct RecordingDispatcher {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl RecordingDispatcher {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<String, PromptlabError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Text of the last user message of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        self.requests()
            .last()
            .and_then(|r| r.messages.last())
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl ChatDispatcher for RecordingDispatcher {
    async fn dispatch(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        let reply = (self.responder)(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        reply.map(ChatResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlab_core::SamplingParams;

    #[tokio::test]
    async fn records_and_answers() {
        let dispatcher = RecordingDispatcher::new(|req| Ok(format!("echo {}", req.model)));
        let resp = dispatcher
            .dispatch(ChatRequest::user_prompt("m1", "hello", SamplingParams::default()))
            .await
            .unwrap();
        assert_eq!(resp.text, "echo m1");
        assert_eq!(dispatcher.call_count(), 1);
        assert_eq!(dispatcher.last_prompt().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn errors_are_recorded_too() {
        let dispatcher =
            RecordingDispatcher::new(|_| Err(PromptlabError::provider("stub", "down")));
        let err = dispatcher
            .dispatch(ChatRequest::user_prompt("m", "p", SamplingParams::default()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("down"));
        assert_eq!(dispatcher.call_count(), 1);
    }
}
