// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly: context turn, recent history, then the triggering message.

use taskchat_core::types::{ChatMessage, PartnerId, Turn};

use crate::context::TaskContext;
use crate::markup::strip_markup;

/// Default system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "Eres un asistente experto en tareas de Odoo. Usa el contexto proporcionado para responder con claridad y precisión. Responde en texto claro sin formatos y de manera ordenada, de forma que la respuesta se entienda de manera fácil";

const CONTEXT_PREFIX: &str = "Contexto:\n";

/// Builds the ordered turn list for one request.
///
/// `history` is expected newest first, as returned by
/// [`MessageStore::recent_comments`](taskchat_core::MessageStore::recent_comments).
/// The trigger is dropped from it by id so it only appears as the final turn,
/// which is why callers fetch `limit + 1` rows. At most `limit` history turns
/// are kept, oldest first.
pub fn build_conversation(
    context: &TaskContext,
    history: &[ChatMessage],
    trigger: &ChatMessage,
    assistant: PartnerId,
    limit: usize,
) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(limit + 2);
    turns.push(Turn::user(format!("{CONTEXT_PREFIX}{context}")));

    let recent: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.id != trigger.id)
        .take(limit)
        .collect();

    for message in recent.into_iter().rev() {
        let text = strip_markup(message.body.trim());
        if text.is_empty() {
            continue;
        }
        if message.author_id == Some(assistant) {
            turns.push(Turn::model(text));
        } else {
            turns.push(Turn::user(text));
        }
    }

    turns.push(Turn::user(strip_markup(trigger.body.trim())));
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskchat_core::types::{ChannelId, MessageId, MessageType, TurnRole};

    const ASSISTANT: PartnerId = PartnerId(2);
    const USER: PartnerId = PartnerId(7);

    fn message(id: i64, author: PartnerId, body: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId(id),
            channel_id: ChannelId(1),
            author_id: Some(author),
            body: body.to_string(),
            message_type: MessageType::Comment,
            created_at: format!("2025-01-01 10:00:{:02}", id % 60),
        }
    }

    #[test]
    fn context_first_trigger_last() {
        let trigger = message(3, USER, "<p>¿Qué vence hoy?</p>");
        let history = vec![
            trigger.clone(),
            message(2, ASSISTANT, "<p>Hola, ¿en qué ayudo?</p>"),
            message(1, USER, "<p>Hola</p>"),
        ];
        let ctx = TaskContext::NoTasks;

        let turns = build_conversation(&ctx, &history, &trigger, ASSISTANT, 10);

        assert_eq!(turns.len(), 4);
        assert_eq!(
            turns[0],
            Turn::user("Contexto:\nNo hay tareas registradas en el sistema.")
        );
        assert_eq!(turns[1], Turn::user("Hola"));
        assert_eq!(turns[2], Turn::model("Hola, ¿en qué ayudo?"));
        assert_eq!(turns[3], Turn::user("¿Qué vence hoy?"));
    }

    #[test]
    fn history_capped_at_limit() {
        let trigger = message(100, USER, "última");
        let history: Vec<ChatMessage> = (1..=25)
            .rev()
            .map(|i| message(i, USER, &format!("mensaje {i}")))
            .collect();

        let turns = build_conversation(&TaskContext::NoTasks, &history, &trigger, ASSISTANT, 10);

        assert_eq!(turns.len(), 12);
        // The ten newest, oldest first.
        assert_eq!(turns[1].text, "mensaje 16");
        assert_eq!(turns[10].text, "mensaje 25");
        assert_eq!(turns[11].text, "última");
    }

    #[test]
    fn empty_bodies_skipped() {
        let trigger = message(4, USER, "hola");
        let history = vec![
            message(3, USER, "   "),
            message(2, ASSISTANT, "<br/>"),
            message(1, USER, "antes"),
        ];

        let turns = build_conversation(&TaskContext::NoTasks, &history, &trigger, ASSISTANT, 10);

        let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts[1..], ["antes", "hola"]);
    }

    #[test]
    fn unknown_author_is_user() {
        let trigger = message(2, USER, "hola");
        let mut anonymous = message(1, USER, "sistema");
        anonymous.author_id = None;

        let turns =
            build_conversation(&TaskContext::NoTasks, &[anonymous], &trigger, ASSISTANT, 10);

        assert_eq!(turns[1].role, TurnRole::User);
    }

    #[test]
    fn degraded_context_still_first() {
        let trigger = message(1, USER, "hola");
        let turns = build_conversation(&TaskContext::Degraded, &[], &trigger, ASSISTANT, 10);
        assert_eq!(
            turns[0].text,
            "Contexto:\nError al obtener el contexto de tareas."
        );
        assert_eq!(turns.len(), 2);
    }
}
