// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./taskchat.toml` > `~/.config/taskchat/taskchat.toml`
//! > `/etc/taskchat/taskchat.toml`, with environment variable overrides via the
//! `TASKCHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TaskchatConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/taskchat/taskchat.toml`
/// 3. `~/.config/taskchat/taskchat.toml`
/// 4. `./taskchat.toml`
/// 5. `TASKCHAT_*` environment variables
pub fn load_config() -> Result<TaskchatConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TaskchatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskchatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TaskchatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaskchatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TaskchatConfig::default()))
        .merge(Toml::file("/etc/taskchat/taskchat.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("taskchat/taskchat.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("taskchat.toml"))
        .merge(env_provider())
}

/// Environment provider mapping the first underscore after a section name to a dot.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `TASKCHAT_AGENT_POST_ATTEMPTS`
/// must become `agent.post_attempts`, not `agent.post.attempts`.
fn env_provider() -> Env {
    Env::prefixed("TASKCHAT_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = if let Some(rest) = key_str.strip_prefix("agent_") {
            format!("agent.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("gemini_") {
            format!("gemini.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("storage_") {
            format!("storage.{rest}")
        } else {
            key_str.clone()
        };
        mapped.into()
    })
}
