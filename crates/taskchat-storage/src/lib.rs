// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite host for the taskchat responder.
//!
//! Stores partners, their named references, tasks, channel messages and
//! configuration parameters. All access goes through a single
//! `tokio-rusqlite` connection with embedded migrations.

pub mod database;
pub mod host;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use host::SqliteHost;
pub use models::*;
