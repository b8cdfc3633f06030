// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Promptlab workbench.
//!
//! Exposes the optimizer, generator and judge as JSON endpoints. Error
//! bodies are `{error, details?, raw_snippet?}`; missing or malformed input
//! is a 400, every other failure a 500.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, start_server, GatewayState};
