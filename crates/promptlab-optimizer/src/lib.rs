// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt optimizer and response generator.
//!
//! Both are thin services over a [`promptlab_core::ChatDispatcher`]: the
//! optimizer wraps the user's prompt in a strategy-specific meta-prompt, the
//! generator sends a prompt as-is.

pub mod generator;
pub mod meta_prompt;
pub mod optimizer;
pub mod strategy;

pub use generator::ResponseGenerator;
pub use meta_prompt::build_meta_prompt;
pub use optimizer::{Optimization, PromptOptimizer};
pub use strategy::StrategyId;
