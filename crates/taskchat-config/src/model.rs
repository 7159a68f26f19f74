// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level taskchat configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section defaults to working values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskchatConfig {
    /// Responder behavior and host references.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini API endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// SQLite host database settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Host reference of the assistant participant.
    #[serde(default = "default_assistant_ref")]
    pub assistant_ref: String,

    /// Host reference used to attribute notices when the assistant is missing.
    #[serde(default = "default_fallback_ref")]
    pub fallback_ref: String,

    /// Key of the host configuration parameter holding the Gemini API key.
    #[serde(default = "default_api_key_param")]
    pub api_key_param: String,

    /// Number of channel comments used as conversation history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Attempts made when posting the reply back to the channel.
    #[serde(default = "default_post_attempts")]
    pub post_attempts: u32,

    /// Delay between reply post attempts, in milliseconds.
    #[serde(default = "default_post_retry_delay_ms")]
    pub post_retry_delay_ms: u64,

    /// Replaces the built-in system instruction when set.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            assistant_ref: default_assistant_ref(),
            fallback_ref: default_fallback_ref(),
            api_key_param: default_api_key_param(),
            history_limit: default_history_limit(),
            post_attempts: default_post_attempts(),
            post_retry_delay_ms: default_post_retry_delay_ms(),
            system_prompt: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_assistant_ref() -> String {
    "chatbot_ai.ai_assistant_partner".to_string()
}

fn default_fallback_ref() -> String {
    "base.partner_admin".to_string()
}

fn default_api_key_param() -> String {
    "chatbot_ai.gemini_api_key".to_string()
}

fn default_history_limit() -> usize {
    10
}

fn default_post_attempts() -> u32 {
    3
}

fn default_post_retry_delay_ms() -> u64 {
    500
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API base URL, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier used in the `generateContent` path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds. `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-05-20".to_string()
}

/// SQLite host database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("taskchat").join("taskchat.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("taskchat.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}
