// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Promptlab integration tests.
//!
//! Provides stub providers and dispatchers for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - provider binding with queued replies and a call counter
//! - [`RecordingDispatcher`] - router stand-in that records requests and answers via a closure

pub mod mock_provider;
pub mod recording_dispatcher;

pub use mock_provider::MockProvider;
pub use recording_dispatcher::RecordingDispatcher;
