// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end responder tests.
//!
//! `TestHarness` wires an [`AssistantResponder`] to a [`MockHost`] and a
//! [`MockModel`]. `send_message()` stores a comment and fires the responder
//! hook the way the host does after a durable write.

use std::sync::Arc;
use std::time::Duration;

use taskchat_agent::{AssistantResponder, HostSession, ResponderSettings};
use taskchat_core::types::{ChannelId, ChatMessage, PartnerId, Task};

use crate::mock_host::MockHost;
use crate::mock_model::{MockModel, MockOutcome};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    settings: ResponderSettings,
    outcomes: Vec<MockOutcome>,
    tasks: Vec<Task>,
    api_key: Option<String>,
    register_assistant: bool,
    register_fallback: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            settings: ResponderSettings::default(),
            outcomes: Vec::new(),
            tasks: Vec::new(),
            api_key: Some("test-api-key".to_string()),
            register_assistant: true,
            register_fallback: true,
        }
    }

    /// Queue model outcomes, consumed one per generation call.
    pub fn with_outcomes(mut self, outcomes: Vec<MockOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// `None` leaves the API key parameter unset.
    pub fn with_api_key(mut self, key: Option<&str>) -> Self {
        self.api_key = key.map(str::to_string);
        self
    }

    pub fn without_assistant(mut self) -> Self {
        self.register_assistant = false;
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.register_fallback = false;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.settings.history_limit = limit;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.settings.post_retry_delay = delay;
        self
    }

    pub async fn build(self) -> TestHarness {
        let host = Arc::new(MockHost::new());
        for task in self.tasks {
            host.add_task(task).await;
        }
        if let Some(key) = &self.api_key {
            host.set_param(&self.settings.api_key_param, key).await;
        }
        if self.register_assistant {
            host.register_identity(&self.settings.assistant_ref, TestHarness::ASSISTANT)
                .await;
        }
        if self.register_fallback {
            host.register_identity(&self.settings.fallback_ref, TestHarness::ADMIN)
                .await;
        }

        let model = Arc::new(MockModel::with_outcomes(self.outcomes));
        let responder = AssistantResponder::new(model.clone(), self.settings);
        let session = HostSession::from_host(host.clone());

        TestHarness {
            host,
            model,
            responder,
            session,
        }
    }
}

/// A responder wired to in-memory collaborators.
pub struct TestHarness {
    pub host: Arc<MockHost>,
    pub model: Arc<MockModel>,
    pub responder: AssistantResponder,
    pub session: HostSession,
}

impl TestHarness {
    pub const ASSISTANT: PartnerId = PartnerId(2);
    pub const ADMIN: PartnerId = PartnerId(3);
    pub const USER: PartnerId = PartnerId(7);
    pub const CHANNEL: ChannelId = ChannelId(1);

    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Stores a user comment in the test channel and runs the responder on it.
    pub async fn send_message(&self, body: &str) -> ChatMessage {
        self.send_as(Some(Self::USER), body).await
    }

    pub async fn send_as(&self, author: Option<PartnerId>, body: &str) -> ChatMessage {
        let message = self.host.store_comment(Self::CHANNEL, author, body).await;
        self.responder
            .on_message_posted(&self.session, &message)
            .await;
        message
    }

    /// Stores a comment without running the responder.
    pub async fn seed_comment(&self, author: PartnerId, body: &str) -> ChatMessage {
        self.host
            .store_comment(Self::CHANNEL, Some(author), body)
            .await
    }
}
