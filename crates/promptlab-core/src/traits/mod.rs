// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the provider and dispatch seams.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod dispatch;
pub mod provider;

pub use dispatch::ChatDispatcher;
pub use provider::ProviderAdapter;
