// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel message reads and writes.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::params;
use rusqlite::types::Type;
use taskchat_core::TaskchatError;
use taskchat_core::types::{
    ChannelId, ChatMessage, MessageId, MessageType, OutboundPost, PartnerId,
};

use crate::database::Database;
use crate::models::DATETIME_FORMAT;

/// Insert a message. Returns its id.
pub async fn insert_message(
    db: &Database,
    post: &OutboundPost,
) -> Result<MessageId, TaskchatError> {
    let post = post.clone();
    let created_at = Utc::now().naive_utc().format(DATETIME_FORMAT).to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute(
                "INSERT INTO messages (channel_id, author_id, body, message_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    post.channel_id.0,
                    post.author_id.map(|a| a.0),
                    post.body,
                    post.message_type.to_string(),
                    created_at,
                ],
            )?;
            Ok(MessageId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a single message by id.
pub async fn get_message(
    db: &Database,
    id: MessageId,
) -> Result<Option<ChatMessage>, TaskchatError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, channel_id, author_id, body, message_type, created_at
                 FROM messages WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id.0], row_to_message)?;
            rows.next().transpose()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Last `limit` comment-type messages of a channel, newest first.
pub async fn recent_comments(
    db: &Database,
    channel: ChannelId,
    limit: usize,
) -> Result<Vec<ChatMessage>, TaskchatError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, channel_id, author_id, body, message_type, created_at
                 FROM messages WHERE channel_id = ?1 AND message_type = ?2
                 ORDER BY id DESC LIMIT ?3",
            )?;
            let rows = stmt.query_map(
                params![channel.0, MessageType::Comment.to_string(), limit],
                row_to_message,
            )?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatMessage> {
    let message_type: String = row.get(4)?;
    let message_type = MessageType::from_str(&message_type)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(ChatMessage {
        id: MessageId(row.get(0)?),
        channel_id: ChannelId(row.get(1)?),
        author_id: row.get::<_, Option<i64>>(2)?.map(PartnerId),
        body: row.get(3)?,
        message_type,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recent_comments_newest_first_and_limited() {
        let db = Database::open_in_memory().await.unwrap();
        let channel = ChannelId(1);
        for i in 1..=5 {
            let post = OutboundPost::comment(channel, format!("m{i}"), None);
            insert_message(&db, &post).await.unwrap();
        }
        insert_message(&db, &OutboundPost::comment(ChannelId(2), "otro", None))
            .await
            .unwrap();

        let recent = recent_comments(&db, channel, 3).await.unwrap();
        let bodies: Vec<&str> = recent.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["m5", "m4", "m3"]);
    }

    #[tokio::test]
    async fn notifications_are_not_history() {
        let db = Database::open_in_memory().await.unwrap();
        let channel = ChannelId(4);
        insert_message(&db, &OutboundPost::comment(channel, "comentario", None))
            .await
            .unwrap();
        let notification = OutboundPost {
            message_type: MessageType::Notification,
            ..OutboundPost::comment(channel, "aviso", None)
        };
        let id = insert_message(&db, &notification).await.unwrap();

        let recent = recent_comments(&db, channel, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].body, "comentario");

        let stored = get_message(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.message_type, MessageType::Notification);
        assert_eq!(stored.author_id, None);
    }
}
