// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Promptlab workbench.

use strum::Display;
use thiserror::Error;

/// Coarse classification of a [`PromptlabError`], used for logging and for
/// mapping errors onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InputValidation,
    Configuration,
    ProviderCall,
    JudgeOutputFormat,
    Internal,
}

/// The primary error type shared by the router, optimizer, generator and judge.
#[derive(Debug, Error)]
pub enum PromptlabError {
    /// A required input field is missing or empty. Never reaches the network.
    #[error("{0}")]
    InputValidation(String),

    /// Missing credential or invalid configuration for the selected provider.
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream inference call failed (network, auth, provider-side error).
    #[error("{provider} provider error: {message}")]
    Provider {
        provider: String,
        message: String,
        /// Upstream HTTP status, when the failure carried one.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The judge model answered, but its text could not be coerced into a report.
    #[error("judge output format error: {message}")]
    JudgeOutputFormat {
        message: String,
        /// Parser diagnostic from the last repair stage.
        details: String,
        /// Leading slice of the offending raw text.
        raw_snippet: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PromptlabError {
    /// Builds a provider error without an upstream status or source.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PromptlabError::Provider {
            provider: provider.into(),
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptlabError::InputValidation(_) => ErrorKind::InputValidation,
            PromptlabError::Config(_) => ErrorKind::Configuration,
            PromptlabError::Provider { .. } => ErrorKind::ProviderCall,
            PromptlabError::JudgeOutputFormat { .. } => ErrorKind::JudgeOutputFormat,
            PromptlabError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for upstream overload signals (HTTP 429 / 503).
    ///
    /// Batch callers use this to decide whether a bounded backoff retry is worthwhile;
    /// the core itself never retries.
    pub fn is_overloaded(&self) -> bool {
        matches!(
            self,
            PromptlabError::Provider {
                status: Some(429 | 503),
                ..
            }
        )
    }
}
