// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration behind the `promptlab` command line.
//!
//! The core crates answer one request at a time. This crate composes them:
//! [`pipeline`] runs one optimize, generate and judge comparison, [`bench`]
//! repeats it over a dataset and writes reports, and [`retry`] adds the
//! overload backoff that only batch callers want.

pub mod bench;
pub mod pipeline;
pub mod retry;
pub mod serve;
pub mod workbench;

pub use pipeline::{Arm, CompareOptions, Comparison};
pub use retry::RetryPolicy;
pub use workbench::Workbench;
