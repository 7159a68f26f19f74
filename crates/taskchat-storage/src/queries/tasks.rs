// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task reads and inserts.

use chrono::{NaiveDateTime, Utc};
use rusqlite::params;
use rusqlite::types::Type;
use taskchat_core::TaskchatError;
use taskchat_core::types::Task;

use crate::database::Database;
use crate::models::{DATETIME_FORMAT, NewTask};

/// Returns every active task with its assignees, oldest first.
pub async fn active_tasks(db: &Database) -> Result<Vec<Task>, TaskchatError> {
    db.connection()
        .call(|conn| -> Result<_, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, name, state, priority, project, create_date, write_date, date_deadline
                 FROM tasks WHERE active = 1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let id: i64 = row.get(0)?;
                let task = Task {
                    name: row.get(1)?,
                    state: row.get(2)?,
                    priority: row.get(3)?,
                    project: row.get(4)?,
                    create_date: parse_datetime(row.get(5)?, 5)?,
                    write_date: parse_datetime(row.get(6)?, 6)?,
                    date_deadline: parse_datetime(row.get(7)?, 7)?,
                    assignees: Vec::new(),
                };
                Ok((id, task))
            })?;
            let rows: Vec<(i64, Task)> = rows.collect::<Result<_, _>>()?;

            let mut assignee_stmt = conn.prepare(
                "SELECT user_name FROM task_assignees WHERE task_id = ?1 ORDER BY rowid ASC",
            )?;
            let mut tasks = Vec::with_capacity(rows.len());
            for (id, mut task) in rows {
                let names = assignee_stmt.query_map(params![id], |row| row.get(0))?;
                task.assignees = names.collect::<Result<_, _>>()?;
                tasks.push(task);
            }
            Ok(tasks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Inserts a task and its assignees in one transaction. Returns the new task id.
pub async fn insert_task(db: &Database, task: &NewTask) -> Result<i64, TaskchatError> {
    let task = task.clone();
    let now = Utc::now().naive_utc().format(DATETIME_FORMAT).to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let tx = conn.transaction()?;
            let deadline = task
                .date_deadline
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.format(DATETIME_FORMAT).to_string());
            tx.execute(
                "INSERT INTO tasks (name, state, priority, project, create_date, write_date, date_deadline)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6)",
                params![task.name, task.state, task.priority, task.project, now, deadline],
            )?;
            let id = tx.last_insert_rowid();
            for assignee in &task.assignees {
                tx.execute(
                    "INSERT OR IGNORE INTO task_assignees (task_id, user_name) VALUES (?1, ?2)",
                    params![id, assignee],
                )?;
            }
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Marks a task inactive so it drops out of the context.
pub async fn archive_task(db: &Database, id: i64) -> Result<bool, TaskchatError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let changed = conn.execute("UPDATE tasks SET active = 0 WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn parse_datetime(raw: Option<String>, column: usize) -> rusqlite::Result<Option<NaiveDateTime>> {
    raw.map(|text| {
        NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
    })
    .transpose()
}
