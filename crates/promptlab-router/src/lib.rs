// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing for the Promptlab workbench.
//!
//! Maps a model identifier onto a provider family, checks that family's
//! credential, and dispatches through a lazily built provider binding.

pub mod classifier;
pub mod factory;
pub mod reasoning;
pub mod router;

pub use classifier::classify;
pub use factory::{HttpProviderFactory, ProviderFactory};
pub use reasoning::strip_reasoning_trace;
pub use router::{ModelRouter, RoutingDecision};
