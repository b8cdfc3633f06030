// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock provider binding for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use promptlab_core::{ChatRequest, ChatResponse, PromptlabError, ProviderAdapter};

enum Reply {
    Text(String),
    Failure { status: u16, message: String },
}

/// A mock provider that returns queued replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every call is counted and
/// its request recorded.
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::named("mock-provider")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock provider pre-loaded with the given texts.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        Self {
            replies: Arc::new(Mutex::new(
                responses.into_iter().map(Reply::Text).collect(),
            )),
            ..provider
        }
    }

    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Reply::Text(text.into()));
    }

    /// Queue an upstream failure carrying `status`.
    pub async fn add_failure(&self, status: u16, message: impl Into<String>) {
        self.replies.lock().await.push_back(Reply::Failure {
            status,
            message: message.into(),
        });
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);
        match self.replies.lock().await.pop_front() {
            Some(Reply::Text(text)) => Ok(ChatResponse::new(text)),
            Some(Reply::Failure { status, message }) => Err(PromptlabError::Provider {
                provider: self.name.clone(),
                message,
                status: Some(status),
                source: None,
            }),
            None => Ok(ChatResponse::new("mock response")),
        }
    }
}
