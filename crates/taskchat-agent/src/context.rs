// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task context: a plain-text summary of every active task.
//!
//! Building the context never fails. A store error degrades to a fixed
//! sentence so the reply can still be generated.

use std::fmt;

use chrono::NaiveDateTime;
use taskchat_core::TaskStore;
use taskchat_core::types::{Task, priority_label, state_label};
use tracing::{debug, error};

/// Context text used when no task is active.
pub const NO_TASKS: &str = "No hay tareas registradas en el sistema.";

/// Context text used when the task store could not be read.
pub const CONTEXT_UNAVAILABLE: &str = "Error al obtener el contexto de tareas.";

const DATE_FORMAT: &str = "%d-%m-%Y";
const NO_NAME: &str = "Sin nombre";
const NO_DATE: &str = "Sin fecha";
const UNASSIGNED: &str = "Sin asignar";
const NO_PROJECT: &str = "Sin proyecto";

/// The task context handed to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskContext {
    /// One line per active task.
    Summary(String),
    /// There are no active tasks.
    NoTasks,
    /// The task store failed; the prompt carries a fixed notice instead.
    Degraded,
}

impl TaskContext {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Summary(text) => text,
            Self::NoTasks => NO_TASKS,
            Self::Degraded => CONTEXT_UNAVAILABLE,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

impl fmt::Display for TaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queries the active tasks and summarizes them.
pub async fn build_task_context(store: &dyn TaskStore) -> TaskContext {
    match store.active_tasks().await {
        Ok(tasks) => {
            debug!(count = tasks.len(), "active tasks loaded");
            summarize_tasks(&tasks)
        }
        Err(e) => {
            error!(error = %e, "failed to load task context");
            TaskContext::Degraded
        }
    }
}

/// Renders the summary for an already-loaded task list.
pub fn summarize_tasks(tasks: &[Task]) -> TaskContext {
    if tasks.is_empty() {
        return TaskContext::NoTasks;
    }

    let mut text = format!("Tienes {} tareas activas:\n\n", tasks.len());
    for task in tasks {
        text.push_str(&task_line(task));
        text.push('\n');
    }
    TaskContext::Summary(text.trim().to_string())
}

fn task_line(task: &Task) -> String {
    let name = task.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(NO_NAME);
    let assignees = if task.assignees.is_empty() {
        UNASSIGNED.to_string()
    } else {
        task.assignees.join(", ")
    };
    let project = task
        .project
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(NO_PROJECT);

    format!(
        "- {name} | Estado: {} | Creación {} | Actualización {} | Prioridad: {} | Asignado a: {assignees} | Vence: {} | Proyecto: {project}",
        state_label(&task.state),
        format_date(task.create_date),
        format_date(task.write_date),
        priority_label(&task.priority),
        format_date(task.date_deadline),
    )
}

fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}
