// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini language model for taskchat.
//!
//! This crate implements [`LanguageModel`] on top of the Gemini
//! `generateContent` REST method: one POST per call, API key in the
//! `x-goog-api-key` header, no retries.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use taskchat_config::model::GeminiConfig;
use taskchat_core::TaskchatError;
use taskchat_core::traits::LanguageModel;
use taskchat_core::types::{Completion, GenerateRequest};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, Part, SystemInstruction,
};

/// Gemini provider implementing [`LanguageModel`].
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` configuration section.
    pub fn new(config: &GeminiConfig) -> Result<Self, TaskchatError> {
        let client = GeminiClient::new(
            config.base_url.clone(),
            config.model.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )?;

        info!(model = config.model.as_str(), "Gemini provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }

    fn to_request(request: &GenerateRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part::text(request.system_instruction.clone())],
            },
            contents: request
                .turns
                .iter()
                .map(|turn| Content {
                    role: Some(turn.role.to_string()),
                    parts: vec![Part::text(turn.text.clone())],
                })
                .collect(),
        }
    }
}

/// Reduces a 200 response to a [`Completion`].
///
/// A candidate without a text part is a malformed answer, not an empty one.
fn to_completion(response: GenerateContentResponse) -> Result<Completion, TaskchatError> {
    let Some(candidate) = response.candidates.first() else {
        return Ok(Completion::Empty);
    };
    candidate
        .first_text()
        .map(|text| Completion::Reply(text.to_string()))
        .ok_or_else(|| TaskchatError::Provider {
            message: format!(
                "first candidate carries no text part (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ),
            source: None,
        })
}

#[async_trait]
impl LanguageModel for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Completion, TaskchatError> {
        let api_request = Self::to_request(&request);
        debug!(
            turns = api_request.contents.len(),
            model = self.client.model(),
            "sending generateContent request"
        );
        let response = self
            .client
            .generate_content(&request.api_key, &api_request)
            .await?;
        to_completion(response)
    }
}
