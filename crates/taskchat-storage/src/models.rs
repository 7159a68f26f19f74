// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row shapes written by the host-side commands.

use chrono::NaiveDate;

/// Stored date-time text format.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A task to insert.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: Option<String>,
    /// State selection code, e.g. `01_in_progress`.
    pub state: String,
    /// Priority selection code, `0` or `1`.
    pub priority: String,
    pub project: Option<String>,
    pub assignees: Vec<String>,
    pub date_deadline: Option<NaiveDate>,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            state: "01_in_progress".to_string(),
            priority: "0".to_string(),
            project: None,
            assignees: Vec::new(),
            date_deadline: None,
        }
    }
}
