// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the responder depends on.
//!
//! The host traits stand in for the application's task, messaging, identity,
//! and configuration-parameter stores. All use `#[async_trait]` for dynamic
//! dispatch compatibility.

pub mod host;
pub mod model;

pub use host::{IdentityResolver, MessageStore, ParamStore, TaskStore};
pub use model::LanguageModel;
