// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host application collaborators.

use async_trait::async_trait;

use crate::error::TaskchatError;
use crate::types::{ChannelId, ChatMessage, MessageId, OutboundPost, PartnerId, Task};

/// Read access to the host's task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task marked active.
    async fn active_tasks(&self) -> Result<Vec<Task>, TaskchatError>;
}

/// Read/write access to channel messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Returns the last `limit` comment-type messages of `channel`, newest first.
    async fn recent_comments(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, TaskchatError>;

    /// Writes a message into its channel.
    async fn post(&self, post: OutboundPost) -> Result<MessageId, TaskchatError>;
}

/// Resolves named references (e.g. `chatbot_ai.ai_assistant_partner`) to participants.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `None` when the reference is not installed.
    async fn resolve(&self, reference: &str) -> Result<Option<PartnerId>, TaskchatError>;
}

/// The host's key-value configuration parameter store.
#[async_trait]
pub trait ParamStore: Send + Sync {
    async fn get_param(&self, key: &str) -> Result<Option<String>, TaskchatError>;
}
