// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for taskchat integration tests.
//!
//! Provides in-memory collaborators and a harness for fast, deterministic
//! tests without a database or network.
//!
//! # Components
//!
//! - [`MockHost`] - In-memory task, message, identity and parameter store with failure injection
//! - [`MockModel`] - Mock language model with scripted outcomes
//! - [`TestHarness`] - Responder wired to both mocks

pub mod harness;
pub mod mock_host;
pub mod mock_model;

pub use harness::TestHarness;
pub use mock_host::MockHost;
pub use mock_model::{MockModel, MockOutcome};
