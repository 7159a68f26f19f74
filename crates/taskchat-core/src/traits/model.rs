// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model trait for generative text APIs.

use async_trait::async_trait;

use crate::error::TaskchatError;
use crate::types::{Completion, GenerateRequest};

/// A generative language model reachable over the network.
///
/// Implementations send exactly one request per call and never retry.
/// A non-success HTTP status is reported as [`TaskchatError::Api`] carrying
/// the raw response body; transport failures as [`TaskchatError::Provider`].
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Generates a completion for the given prompt.
    async fn generate(&self, request: GenerateRequest) -> Result<Completion, TaskchatError>;
}
