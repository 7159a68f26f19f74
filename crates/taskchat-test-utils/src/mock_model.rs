// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic testing.
//!
//! Outcomes are popped from a FIFO queue. When the queue is empty, a
//! "mock response" reply is returned.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use taskchat_core::types::{Completion, GenerateRequest};
use taskchat_core::{LanguageModel, TaskchatError};

/// What the mock answers to one generation call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Reply(String),
    /// A 200 response without candidates.
    Empty,
    ApiError { status: u16, body: String },
    TransportError,
}

pub struct MockModel {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<GenerateRequest>>,
    calls: AtomicUsize,
}

impl MockModel {
    pub fn new() -> Self {
        Self::with_outcomes(Vec::new())
    }

    pub fn with_outcomes(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Completion, TaskchatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Reply("mock response".to_string()));

        match outcome {
            MockOutcome::Reply(text) => Ok(Completion::Reply(text)),
            MockOutcome::Empty => Ok(Completion::Empty),
            MockOutcome::ApiError { status, body } => Err(TaskchatError::Api { status, body }),
            MockOutcome::TransportError => Err(TaskchatError::Provider {
                message: "connection reset".into(),
                source: None,
            }),
        }
    }
}
