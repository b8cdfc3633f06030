// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch capability consumed by the optimizer, generator and judge.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PromptlabError;
use crate::types::{ChatRequest, ChatResponse};

/// Send messages, get text, under a model identifier.
///
/// The model router is the production implementation; tests substitute a
/// recording stub.
#[async_trait]
pub trait ChatDispatcher: Send + Sync {
    async fn dispatch(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError>;
}

#[async_trait]
impl<T: ChatDispatcher + ?Sized> ChatDispatcher for Arc<T> {
    async fn dispatch(&self, request: ChatRequest) -> Result<ChatResponse, PromptlabError> {
        (**self).dispatch(request).await
    }
}
