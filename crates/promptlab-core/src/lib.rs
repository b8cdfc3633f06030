// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Promptlab workbench.
//!
//! This crate provides the error taxonomy, the transient chat types and the
//! two traits every other crate is written against: [`ProviderAdapter`] for a
//! single provider binding and [`ChatDispatcher`] for "send messages, get
//! text, under a model identifier".

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, PromptlabError};
pub use traits::{ChatDispatcher, ProviderAdapter};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, ProviderKind, SamplingParams};

/// Returns the leading `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
