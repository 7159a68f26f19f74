// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the host collaborators, the language model, and the responder.

use std::str::FromStr;

use chrono::NaiveDateTime;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a participant (author) record in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub i64);

/// Identifier of a chat channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub i64);

/// Identifier of a stored chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

/// Kind of a chat message, stored by the host as a string code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Comment,
    Notification,
    Email,
    UserNotification,
}

/// Lifecycle state of a task, keyed by the host's selection code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TaskState {
    #[strum(serialize = "01_in_progress")]
    InProgress,
    #[strum(serialize = "02_changes_requested")]
    ChangesRequested,
    #[strum(serialize = "03_approved")]
    Approved,
    #[strum(serialize = "04_waiting_normal")]
    Waiting,
    #[strum(serialize = "1_done")]
    Done,
    #[strum(serialize = "1_canceled")]
    Cancelled,
}

impl TaskState {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::ChangesRequested => "Changes Requested",
            Self::Approved => "Approved",
            Self::Waiting => "Waiting",
            Self::Done => "Done",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Priority of a task, keyed by the host's selection code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TaskPriority {
    #[strum(serialize = "0")]
    Low,
    #[strum(serialize = "1")]
    High,
}

impl TaskPriority {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

/// Label for a state code. Unknown codes are returned unchanged.
pub fn state_label(code: &str) -> &str {
    TaskState::from_str(code).map(TaskState::label).unwrap_or(code)
}

/// Label for a priority code. Unknown codes are returned unchanged.
pub fn priority_label(code: &str) -> &str {
    TaskPriority::from_str(code)
        .map(TaskPriority::label)
        .unwrap_or(code)
}

/// An active task as read from the host task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: Option<String>,
    /// State selection code (see [`TaskState`]).
    pub state: String,
    pub create_date: Option<NaiveDateTime>,
    pub write_date: Option<NaiveDateTime>,
    /// Priority selection code (see [`TaskPriority`]).
    pub priority: String,
    /// Names of the assigned users.
    pub assignees: Vec<String>,
    pub date_deadline: Option<NaiveDateTime>,
    pub project: Option<String>,
}

/// A chat message stored in a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: Option<PartnerId>,
    /// Markup body as stored by the host.
    pub body: String,
    pub message_type: MessageType,
    pub created_at: String,
}

/// A message to be written into a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundPost {
    pub channel_id: ChannelId,
    pub body: String,
    pub message_type: MessageType,
    /// `None` lets the host pick its default author.
    pub author_id: Option<PartnerId>,
}

impl OutboundPost {
    /// A comment-type post attributed to `author_id`.
    pub fn comment(
        channel_id: ChannelId,
        body: impl Into<String>,
        author_id: Option<PartnerId>,
    ) -> Self {
        Self {
            channel_id,
            body: body.into(),
            message_type: MessageType::Comment,
            author_id,
        }
    }
}

/// Role of a prompt turn, in the language model's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// One role-tagged text unit of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// A single generation request sent to a language model.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Read from the host parameter store for every request.
    pub api_key: SecretString,
    pub system_instruction: String,
    pub turns: Vec<Turn>,
}

/// Outcome of a successful (HTTP 200) generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Text of the first candidate.
    Reply(String),
    /// The response carried no candidates.
    Empty,
}
