// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the host collaborator traits.

use async_trait::async_trait;
use tracing::debug;

use taskchat_core::types::{ChannelId, ChatMessage, MessageId, OutboundPost, PartnerId, Task};
use taskchat_core::{IdentityResolver, MessageStore, ParamStore, TaskStore, TaskchatError};

use crate::database::Database;
use crate::models::NewTask;
use crate::queries;

/// Host backed by a [`Database`].
///
/// Implements every collaborator trait the responder needs, plus the writes
/// the CLI uses to populate the host.
pub struct SqliteHost {
    db: Database,
}

impl SqliteHost {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn insert_partner(&self, name: &str) -> Result<PartnerId, TaskchatError> {
        let id = queries::identities::insert_partner(&self.db, name).await?;
        debug!(partner_id = id.0, name, "partner created");
        Ok(id)
    }

    pub async fn link_reference(
        &self,
        reference: &str,
        partner: PartnerId,
    ) -> Result<(), TaskchatError> {
        queries::identities::link_reference(&self.db, reference, partner).await
    }

    pub async fn set_param(&self, key: &str, value: &str) -> Result<(), TaskchatError> {
        queries::params::set_param(&self.db, key, value).await
    }

    pub async fn insert_task(&self, task: &NewTask) -> Result<i64, TaskchatError> {
        queries::tasks::insert_task(&self.db, task).await
    }

    pub async fn archive_task(&self, id: i64) -> Result<bool, TaskchatError> {
        queries::tasks::archive_task(&self.db, id).await
    }

    /// Stores a comment and returns it as the host would hand it to a hook.
    pub async fn insert_message(
        &self,
        channel: ChannelId,
        author: Option<PartnerId>,
        body: &str,
    ) -> Result<ChatMessage, TaskchatError> {
        let id = queries::messages::insert_message(
            &self.db,
            &OutboundPost::comment(channel, body, author),
        )
        .await?;
        queries::messages::get_message(&self.db, id)
            .await?
            .ok_or_else(|| {
                TaskchatError::Internal(format!("message {} vanished after insert", id.0))
            })
    }
}

#[async_trait]
impl TaskStore for SqliteHost {
    async fn active_tasks(&self) -> Result<Vec<Task>, TaskchatError> {
        queries::tasks::active_tasks(&self.db).await
    }
}

#[async_trait]
impl MessageStore for SqliteHost {
    async fn recent_comments(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, TaskchatError> {
        queries::messages::recent_comments(&self.db, channel, limit).await
    }

    async fn post(&self, post: OutboundPost) -> Result<MessageId, TaskchatError> {
        queries::messages::insert_message(&self.db, &post).await
    }
}

#[async_trait]
impl IdentityResolver for SqliteHost {
    async fn resolve(&self, reference: &str) -> Result<Option<PartnerId>, TaskchatError> {
        queries::identities::resolve_reference(&self.db, reference).await
    }
}

#[async_trait]
impl ParamStore for SqliteHost {
    async fn get_param(&self, key: &str) -> Result<Option<String>, TaskchatError> {
        queries::params::get_param(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn host_round_trip_through_traits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("host.db");
        let host = SqliteHost::new(Database::open(path.to_str().unwrap()).await.unwrap());

        let bot = host.insert_partner("Asistente").await.unwrap();
        host.link_reference("chatbot_ai.ai_assistant_partner", bot)
            .await
            .unwrap();
        host.set_param("chatbot_ai.gemini_api_key", "k").await.unwrap();
        host.insert_task(&NewTask::named("Preparar demo")).await.unwrap();

        let user = host.insert_partner("Usuario").await.unwrap();
        let stored = host
            .insert_message(ChannelId(1), Some(user), "<p>hola</p>")
            .await
            .unwrap();
        host.post(OutboundPost::comment(ChannelId(1), "respuesta", Some(bot)))
            .await
            .unwrap();

        assert_eq!(
            host.resolve("chatbot_ai.ai_assistant_partner").await.unwrap(),
            Some(bot)
        );
        assert_eq!(
            host.get_param("chatbot_ai.gemini_api_key").await.unwrap().as_deref(),
            Some("k")
        );
        assert_eq!(host.active_tasks().await.unwrap().len(), 1);

        let history = host.recent_comments(ChannelId(1), 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].author_id, Some(bot));
        assert_eq!(history[1].id, stored.id);
        assert_eq!(history[1].body, "<p>hola</p>");
    }
}
