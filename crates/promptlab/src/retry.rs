// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded exponential backoff for batch callers.
//!
//! Only upstream overload (HTTP 429/503) is retried; every other error is
//! returned on the first failure.

use std::future::Future;
use std::time::Duration;

use promptlab_core::PromptlabError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls, the first one included. Zero behaves like one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
        }
    }

    /// Single attempt, no backoff.
    pub const fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub async fn run<T, F, Fut>(&self, what: &str, mut call: F) -> Result<T, PromptlabError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PromptlabError>>,
    {
        let mut delay = self.initial_backoff;
        let mut attempt = 1;
        loop {
            match call().await {
                Err(err) if err.is_overloaded() && attempt < self.max_attempts => {
                    warn!(
                        what,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "provider overloaded, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(2000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn overloaded() -> PromptlabError {
        PromptlabError::Provider {
            provider: "huggingface".into(),
            message: "busy".into(),
            status: Some(503),
            source: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_overload_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::default()
            .run("generate", || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(overloaded())
                } else {
                    Ok("done")
                }
            })
            .await
            .unwrap();
        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn default_policy_makes_three_calls_in_total() {
        let calls = AtomicU32::new(0);
        let err = RetryPolicy::default()
            .run("judge", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(overloaded())
            })
            .await
            .unwrap_err();
        assert!(err.is_overloaded());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn single_attempt_policy_returns_overload_immediately() {
        let calls = AtomicU32::new(0);
        let err = RetryPolicy::none()
            .run("generate", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(overloaded())
            })
            .await
            .unwrap_err();
        assert!(err.is_overloaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let err = RetryPolicy::default()
            .run("optimize", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(PromptlabError::provider("google", "API key not valid"))
            })
            .await
            .unwrap_err();
        assert!(!err.is_overloaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
