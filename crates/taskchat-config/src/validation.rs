// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::TaskchatConfig;

/// Upper bound on conversation history fetched per message.
const MAX_HISTORY_LIMIT: usize = 100;

/// Upper bound on the delay between reply post attempts.
const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &TaskchatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let required = [
        ("agent.assistant_ref", &config.agent.assistant_ref),
        ("agent.fallback_ref", &config.agent.fallback_ref),
        ("agent.api_key_param", &config.agent.api_key_param),
        ("gemini.base_url", &config.gemini.base_url),
        ("gemini.model", &config.gemini.model),
        ("storage.database_path", &config.storage.database_path),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    let base_url = config.gemini.base_url.trim();
    if !base_url.is_empty()
        && !base_url.starts_with("https://")
        && !base_url.starts_with("http://")
    {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.agent.history_limit == 0 || config.agent.history_limit > MAX_HISTORY_LIMIT {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.history_limit must be between 1 and {MAX_HISTORY_LIMIT}, got {}",
                config.agent.history_limit
            ),
        });
    }

    if config.agent.post_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "agent.post_attempts must be at least 1".to_string(),
        });
    }

    if config.agent.post_retry_delay_ms > MAX_RETRY_DELAY_MS {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.post_retry_delay_ms must be at most {MAX_RETRY_DELAY_MS}, got {}",
                config.agent.post_retry_delay_ms
            ),
        });
    }

    if let Some(ref prompt) = config.agent.system_prompt
        && prompt.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "agent.system_prompt must not be blank when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TaskchatConfig::default()).is_ok());
    }

    #[test]
    fn zero_attempts_fails_validation() {
        let mut config = TaskchatConfig::default();
        config.agent.post_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("post_attempts"));
    }

    #[test]
    fn history_limit_out_of_range_fails() {
        let mut config = TaskchatConfig::default();
        config.agent.history_limit = 0;
        assert!(validate_config(&config).is_err());
        config.agent.history_limit = 101;
        assert!(validate_config(&config).is_err());
        config.agent.history_limit = 100;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = TaskchatConfig::default();
        config.gemini.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("gemini.base_url"));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = TaskchatConfig::default();
        config.agent.assistant_ref = " ".to_string();
        config.storage.database_path = String::new();
        config.agent.post_retry_delay_ms = 120_000;
        config.agent.system_prompt = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
