// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

use std::sync::Arc;

use taskchat_agent::{AssistantResponder, HostSession, ResponderSettings};
use taskchat_config::TaskchatConfig;
use taskchat_core::types::{ChannelId, ChatMessage, PartnerId};
use taskchat_core::{MessageStore, TaskchatError};
use taskchat_gemini::GeminiProvider;
use taskchat_storage::{Database, NewTask, SqliteHost};
use tracing::info;

use crate::{Commands, ParamAction, PartnerAction, TaskAction};

pub async fn run(command: Commands, config: &TaskchatConfig) -> Result<(), TaskchatError> {
    let db = Database::open_from_config(&config.storage).await?;
    let host = Arc::new(SqliteHost::new(db));

    match command {
        Commands::Post {
            channel,
            author,
            body,
        } => post(host, config, ChannelId(channel), PartnerId(author), &body).await,
        Commands::Param {
            action: ParamAction::Set { key, value },
        } => {
            host.set_param(&key, &value).await?;
            println!("{key} set");
            Ok(())
        }
        Commands::Partner {
            action: PartnerAction::Add { name, reference },
        } => {
            let id = host.insert_partner(&name).await?;
            if let Some(reference) = &reference {
                host.link_reference(reference, id).await?;
            }
            match reference {
                Some(reference) => println!("partner {} ({name}) -> {reference}", id.0),
                None => println!("partner {} ({name})", id.0),
            }
            Ok(())
        }
        Commands::Task {
            action:
                TaskAction::Add {
                    name,
                    state,
                    priority,
                    project,
                    assignees,
                    deadline,
                },
        } => {
            let task = NewTask {
                name: Some(name),
                state,
                priority,
                project,
                assignees,
                date_deadline: deadline,
            };
            let id = host.insert_task(&task).await?;
            println!("task {id} created");
            Ok(())
        }
        Commands::Task {
            action: TaskAction::Archive { id },
        } => {
            if host.archive_task(id).await? {
                println!("task {id} archived");
            } else {
                println!("task {id} not found");
            }
            Ok(())
        }
        Commands::History { channel, limit } => {
            let mut messages = host.recent_comments(ChannelId(channel), limit).await?;
            messages.reverse();
            for message in &messages {
                print_message(message);
            }
            Ok(())
        }
    }
}

/// Stores the comment, then runs the responder on it as the host hook would.
async fn post(
    host: Arc<SqliteHost>,
    config: &TaskchatConfig,
    channel: ChannelId,
    author: PartnerId,
    body: &str,
) -> Result<(), TaskchatError> {
    let provider = GeminiProvider::new(&config.gemini)?;
    let responder = AssistantResponder::new(
        Arc::new(provider),
        ResponderSettings::from_config(&config.agent),
    );

    let message = host.insert_message(channel, Some(author), body).await?;
    info!(message_id = message.id.0, channel_id = channel.0, "comment stored");

    let session = HostSession::from_host(host.clone());
    responder.on_message_posted(&session, &message).await;

    let replies = replies_after(host.as_ref(), &message, config.agent.history_limit).await?;
    for reply in &replies {
        print_message(reply);
    }
    Ok(())
}

/// Comments written to the channel after `message`, oldest first.
pub async fn replies_after(
    store: &dyn MessageStore,
    message: &ChatMessage,
    limit: usize,
) -> Result<Vec<ChatMessage>, TaskchatError> {
    let mut replies: Vec<ChatMessage> = store
        .recent_comments(message.channel_id, limit)
        .await?
        .into_iter()
        .filter(|m| m.id.0 > message.id.0)
        .collect();
    replies.reverse();
    Ok(replies)
}

fn print_message(message: &ChatMessage) {
    let author = message
        .author_id
        .map(|a| a.0.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("[{}] #{} {}: {}", message.created_at, message.id.0, author, message.body);
}
