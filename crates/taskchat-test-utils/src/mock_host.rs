// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory host implementing every collaborator trait.
//!
//! Successful posts are stored as channel messages, so later history reads
//! see them the way a real host would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use taskchat_core::types::{
    ChannelId, ChatMessage, MessageId, MessageType, OutboundPost, PartnerId, Task,
};
use taskchat_core::{IdentityResolver, MessageStore, ParamStore, TaskStore, TaskchatError};

/// A host whose state lives in memory and whose failures are scripted.
pub struct MockHost {
    tasks: Mutex<Vec<Task>>,
    fail_tasks: AtomicBool,
    messages: Mutex<Vec<ChatMessage>>,
    posted: Mutex<Vec<OutboundPost>>,
    /// Number of upcoming posts that fail before writes succeed again.
    failing_posts: AtomicU32,
    fail_all_posts: AtomicBool,
    identities: Mutex<HashMap<String, PartnerId>>,
    params: Mutex<HashMap<String, String>>,
    fail_params: AtomicBool,
    next_id: AtomicI64,
    task_reads: AtomicUsize,
    history_reads: AtomicUsize,
    post_calls: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            fail_tasks: AtomicBool::new(false),
            messages: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
            failing_posts: AtomicU32::new(0),
            fail_all_posts: AtomicBool::new(false),
            identities: Mutex::new(HashMap::new()),
            params: Mutex::new(HashMap::new()),
            fail_params: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
            task_reads: AtomicUsize::new(0),
            history_reads: AtomicUsize::new(0),
            post_calls: AtomicUsize::new(0),
        }
    }

    pub async fn add_task(&self, task: Task) {
        self.tasks.lock().await.push(task);
    }

    /// Makes every task read fail.
    pub fn fail_task_reads(&self) {
        self.fail_tasks.store(true, Ordering::SeqCst);
    }

    /// Makes the next `count` posts fail.
    pub fn fail_next_posts(&self, count: u32) {
        self.failing_posts.store(count, Ordering::SeqCst);
    }

    /// Makes every post fail.
    pub fn fail_all_posts(&self) {
        self.fail_all_posts.store(true, Ordering::SeqCst);
    }

    /// Makes every parameter read fail.
    pub fn fail_param_reads(&self) {
        self.fail_params.store(true, Ordering::SeqCst);
    }

    pub async fn register_identity(&self, reference: &str, id: PartnerId) {
        self.identities
            .lock()
            .await
            .insert(reference.to_string(), id);
    }

    pub async fn set_param(&self, key: &str, value: &str) {
        self.params
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Stores a comment as if a participant had written it, without firing any hook.
    pub async fn store_comment(
        &self,
        channel_id: ChannelId,
        author_id: Option<PartnerId>,
        body: &str,
    ) -> ChatMessage {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let message = ChatMessage {
            id: MessageId(id),
            channel_id,
            author_id,
            body: body.to_string(),
            message_type: MessageType::Comment,
            created_at: format!("2025-01-01 10:{:02}:{:02}", (id / 60) % 60, id % 60),
        };
        self.messages.lock().await.push(message.clone());
        message
    }

    /// Every post that reached the store, in order.
    pub async fn posted(&self) -> Vec<OutboundPost> {
        self.posted.lock().await.clone()
    }

    pub async fn posted_bodies(&self) -> Vec<String> {
        self.posted
            .lock()
            .await
            .iter()
            .map(|p| p.body.clone())
            .collect()
    }

    pub fn task_reads(&self) -> usize {
        self.task_reads.load(Ordering::SeqCst)
    }

    pub fn history_reads(&self) -> usize {
        self.history_reads.load(Ordering::SeqCst)
    }

    /// Post attempts, including failed ones.
    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    fn take_post_failure(&self) -> bool {
        if self.fail_all_posts.load(Ordering::SeqCst) {
            return true;
        }
        self.failing_posts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MockHost {
    async fn active_tasks(&self) -> Result<Vec<Task>, TaskchatError> {
        self.task_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(TaskchatError::Internal("task store unavailable".into()));
        }
        Ok(self.tasks.lock().await.clone())
    }
}

#[async_trait]
impl MessageStore for MockHost {
    async fn recent_comments(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, TaskchatError> {
        self.history_reads.fetch_add(1, Ordering::SeqCst);
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .rev()
            .filter(|m| m.channel_id == channel && m.message_type == MessageType::Comment)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn post(&self, post: OutboundPost) -> Result<MessageId, TaskchatError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        if self.take_post_failure() {
            return Err(TaskchatError::Channel {
                message: "simulated write failure".into(),
                source: None,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().await.push(ChatMessage {
            id: MessageId(id),
            channel_id: post.channel_id,
            author_id: post.author_id,
            body: post.body.clone(),
            message_type: post.message_type,
            created_at: format!("2025-01-01 11:{:02}:{:02}", (id / 60) % 60, id % 60),
        });
        self.posted.lock().await.push(post);
        Ok(MessageId(id))
    }
}

#[async_trait]
impl IdentityResolver for MockHost {
    async fn resolve(&self, reference: &str) -> Result<Option<PartnerId>, TaskchatError> {
        Ok(self.identities.lock().await.get(reference).copied())
    }
}

#[async_trait]
impl ParamStore for MockHost {
    async fn get_param(&self, key: &str) -> Result<Option<String>, TaskchatError> {
        if self.fail_params.load(Ordering::SeqCst) {
            return Err(TaskchatError::Internal("parameter store unavailable".into()));
        }
        Ok(self.params.lock().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn history_is_newest_first_and_comment_only() {
        let host = MockHost::new();
        let channel = ChannelId(1);
        host.store_comment(channel, Some(PartnerId(7)), "uno").await;
        host.store_comment(ChannelId(9), Some(PartnerId(7)), "otro canal").await;
        host.store_comment(channel, Some(PartnerId(7)), "dos").await;

        let history = host.recent_comments(channel, 10).await.unwrap();
        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["dos", "uno"]);
    }

    #[tokio::test]
    async fn scripted_post_failures_run_out() {
        let host = MockHost::new();
        host.fail_next_posts(2);
        let post = || OutboundPost::comment(ChannelId(1), "hola", None);

        assert!(host.post(post()).await.is_err());
        assert!(host.post(post()).await.is_err());
        assert!(host.post(post()).await.is_ok());
        assert_eq!(host.post_calls(), 3);
        assert_eq!(host.posted().await.len(), 1);
    }

    #[tokio::test]
    async fn param_reads_can_fail() {
        let host = MockHost::new();
        host.set_param("clave", "valor").await;
        assert_eq!(host.get_param("clave").await.unwrap().as_deref(), Some("valor"));

        host.fail_param_reads();
        assert!(host.get_param("clave").await.is_err());
    }
}
