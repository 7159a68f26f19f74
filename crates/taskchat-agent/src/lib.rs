// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant responder for the taskchat host.
//!
//! When a message lands in a channel, [`AssistantResponder::on_message_posted`]:
//! - summarizes the active tasks into a context text
//! - assembles the recent conversation into role-tagged turns
//! - asks the language model for a reply
//! - posts the reply back, or a fixed notice when anything fails

pub mod context;
pub mod conversation;
pub mod markup;
pub mod notices;
pub mod responder;

pub use context::{TaskContext, build_task_context, summarize_tasks};
pub use conversation::{SYSTEM_INSTRUCTION, build_conversation};
pub use markup::strip_markup;
pub use responder::{AssistantResponder, HostSession, ResponderSettings};
