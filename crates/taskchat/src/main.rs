// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! taskchat - a task-aware chat assistant.
//!
//! This is the binary entry point. It drives the SQLite host and fires the
//! assistant responder the way the host does after a message is stored.

mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskchat_core::types::{TaskPriority, TaskState};
use tracing::error;

/// taskchat - a task-aware chat assistant.
#[derive(Parser, Debug)]
#[command(name = "taskchat", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the XDG lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Post a comment to a channel and let the assistant answer it.
    Post {
        #[arg(long)]
        channel: i64,
        /// Partner id of the author.
        #[arg(long)]
        author: i64,
        body: String,
    },
    /// Manage host configuration parameters.
    Param {
        #[command(subcommand)]
        action: ParamAction,
    },
    /// Manage partners.
    Partner {
        #[command(subcommand)]
        action: PartnerAction,
    },
    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Print the recent comments of a channel, oldest first.
    History {
        #[arg(long)]
        channel: i64,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
enum ParamAction {
    /// Set a parameter, e.g. the Gemini API key.
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
enum PartnerAction {
    /// Create a partner, optionally bound to a named reference.
    Add {
        name: String,
        #[arg(long)]
        reference: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TaskAction {
    /// Create an active task.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "01_in_progress", value_parser = parse_state)]
        state: String,
        #[arg(long, default_value = "0", value_parser = parse_priority)]
        priority: String,
        #[arg(long)]
        project: Option<String>,
        /// May be repeated.
        #[arg(long = "assignee")]
        assignees: Vec<String>,
        /// Deadline as YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        deadline: Option<NaiveDate>,
    },
    /// Archive a task so it leaves the assistant's context.
    Archive { id: i64 },
}

fn parse_state(raw: &str) -> Result<String, String> {
    TaskState::from_str(raw)
        .map(|state| state.to_string())
        .map_err(|_| format!("unknown task state `{raw}`"))
}

fn parse_priority(raw: &str) -> Result<String, String> {
    TaskPriority::from_str(raw)
        .map(|priority| priority.to_string())
        .map_err(|_| format!("unknown task priority `{raw}`"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date `{raw}`: {e}"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => taskchat_config::load_and_validate_path(path),
        None => taskchat_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            taskchat_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    if let Err(e) = commands::run(cli.command, &config).await {
        error!(error = %e, "command failed");
        eprintln!("taskchat: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber with an env filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskchat={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_loads_config_defaults() {
        let config = taskchat_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.history_limit, 10);
    }

    #[test]
    fn cli_parses_task_add() {
        let cli = Cli::try_parse_from([
            "taskchat",
            "task",
            "add",
            "--name",
            "Cerrar mes",
            "--state",
            "03_approved",
            "--assignee",
            "Ana",
            "--assignee",
            "Luis",
            "--deadline",
            "2025-07-31",
        ])
        .unwrap();
        match cli.command {
            Commands::Task {
                action:
                    TaskAction::Add {
                        state,
                        priority,
                        assignees,
                        deadline,
                        ..
                    },
            } => {
                assert_eq!(state, "03_approved");
                assert_eq!(priority, "0");
                assert_eq!(assignees, ["Ana", "Luis"]);
                assert_eq!(deadline, NaiveDate::from_ymd_opt(2025, 7, 31));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_state() {
        let result = Cli::try_parse_from([
            "taskchat", "task", "add", "--name", "x", "--state", "bogus",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_post_with_global_config() {
        let cli = Cli::try_parse_from([
            "taskchat",
            "post",
            "--channel",
            "1",
            "--author",
            "7",
            "¿Qué tareas vencen?",
            "--config",
            "/tmp/taskchat.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/taskchat.toml")));
        assert!(matches!(cli.command, Commands::Post { channel: 1, author: 7, .. }));
    }
}
