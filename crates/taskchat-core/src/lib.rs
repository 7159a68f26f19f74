// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the taskchat assistant.
//!
//! This crate provides the error type, the domain types, and the collaborator
//! traits shared by the host adapters, the language model client, and the
//! responder.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TaskchatError;
pub use types::{ChannelId, MessageId, PartnerId};

pub use traits::{IdentityResolver, LanguageModel, MessageStore, ParamStore, TaskStore};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::{
        MessageType, OutboundPost, TaskPriority, TaskState, Turn, TurnRole, priority_label,
        state_label,
    };

    #[test]
    fn state_codes_map_to_labels() {
        assert_eq!(state_label("01_in_progress"), "In Progress");
        assert_eq!(state_label("1_done"), "Done");
        assert_eq!(state_label("1_canceled"), "Cancelled");
        assert_eq!(
            TaskState::from_str("04_waiting_normal").unwrap(),
            TaskState::Waiting
        );
    }

    #[test]
    fn unknown_codes_render_raw() {
        assert_eq!(state_label("99_custom"), "99_custom");
        assert_eq!(priority_label("7"), "7");
    }

    #[test]
    fn priority_codes_map_to_labels() {
        assert_eq!(priority_label("0"), "Low");
        assert_eq!(priority_label("1"), "High");
        assert_eq!(TaskPriority::High.to_string(), "1");
    }

    #[test]
    fn message_type_uses_snake_case_codes() {
        assert_eq!(MessageType::Comment.to_string(), "comment");
        assert_eq!(
            MessageType::from_str("user_notification").unwrap(),
            MessageType::UserNotification
        );
        let json = serde_json::to_string(&MessageType::Comment).unwrap();
        assert_eq!(json, "\"comment\"");
    }

    #[test]
    fn comment_post_defaults_to_comment_type() {
        let post = OutboundPost::comment(ChannelId(4), "hola", Some(PartnerId(2)));
        assert_eq!(post.message_type, MessageType::Comment);
        assert_eq!(post.author_id, Some(PartnerId(2)));
    }

    #[test]
    fn turn_roles_serialize_lowercase() {
        assert_eq!(Turn::model("x").role, TurnRole::Model);
        assert_eq!(TurnRole::User.to_string(), "user");
        assert_eq!(serde_json::to_string(&TurnRole::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn error_variants_render() {
        let api = TaskchatError::Api {
            status: 403,
            body: "denied".into(),
        };
        assert_eq!(api.to_string(), "API returned 403: denied");

        let storage = TaskchatError::storage(std::io::Error::other("disk"));
        assert!(storage.to_string().contains("disk"));

        let internal = TaskchatError::Internal("parameter store unavailable".into());
        assert_eq!(internal.to_string(), "internal error: parameter store unavailable");
    }
}
