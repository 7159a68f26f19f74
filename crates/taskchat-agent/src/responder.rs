// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assistant responder: reacts to a stored chat message with a model reply.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use taskchat_config::model::AgentConfig;
use taskchat_core::types::{
    ChannelId, ChatMessage, Completion, GenerateRequest, MessageId, OutboundPost, PartnerId,
};
use taskchat_core::{
    IdentityResolver, LanguageModel, MessageStore, ParamStore, TaskStore, TaskchatError,
};
use tracing::{debug, error, info, warn};

use crate::context::build_task_context;
use crate::conversation::{SYSTEM_INSTRUCTION, build_conversation};
use crate::notices;

/// The host collaborators available to one invocation.
#[derive(Clone)]
pub struct HostSession {
    pub tasks: Arc<dyn TaskStore>,
    pub messages: Arc<dyn MessageStore>,
    pub identities: Arc<dyn IdentityResolver>,
    pub params: Arc<dyn ParamStore>,
}

impl HostSession {
    /// Uses a single host value for all four collaborators.
    pub fn from_host<H>(host: Arc<H>) -> Self
    where
        H: TaskStore + MessageStore + IdentityResolver + ParamStore + 'static,
    {
        Self {
            tasks: host.clone(),
            messages: host.clone(),
            identities: host.clone(),
            params: host,
        }
    }
}

/// Tunables of the responder, usually derived from [`AgentConfig`].
#[derive(Debug, Clone)]
pub struct ResponderSettings {
    pub assistant_ref: String,
    pub fallback_ref: String,
    pub api_key_param: String,
    pub history_limit: usize,
    pub post_attempts: u32,
    pub post_retry_delay: Duration,
    pub system_instruction: String,
}

impl ResponderSettings {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            assistant_ref: config.assistant_ref.clone(),
            fallback_ref: config.fallback_ref.clone(),
            api_key_param: config.api_key_param.clone(),
            history_limit: config.history_limit,
            post_attempts: config.post_attempts.max(1),
            post_retry_delay: Duration::from_millis(config.post_retry_delay_ms),
            system_instruction: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string()),
        }
    }
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

/// Answers chat messages using the task context and a language model.
///
/// The responder holds no per-invocation state; every call of
/// [`on_message_posted`](Self::on_message_posted) receives its collaborators
/// through a [`HostSession`].
pub struct AssistantResponder {
    model: Arc<dyn LanguageModel>,
    settings: ResponderSettings,
}

impl AssistantResponder {
    pub fn new(model: Arc<dyn LanguageModel>, settings: ResponderSettings) -> Self {
        info!(
            model = model.name(),
            history_limit = settings.history_limit,
            post_attempts = settings.post_attempts,
            "assistant responder initialized"
        );
        Self { model, settings }
    }

    pub fn settings(&self) -> &ResponderSettings {
        &self.settings
    }

    /// Hook invoked after a message has been durably stored in a channel.
    ///
    /// Never returns an error: every failure ends in a notice posted to the
    /// channel, or a log line when even that post fails.
    pub async fn on_message_posted(&self, host: &HostSession, message: &ChatMessage) {
        let assistant = self
            .resolve_identity(host, &self.settings.assistant_ref)
            .await;

        if assistant.is_some() && message.author_id == assistant {
            debug!(message_id = message.id.0, "ignoring message authored by the assistant");
            return;
        }

        info!(
            channel_id = message.channel_id.0,
            message_id = message.id.0,
            "message received"
        );

        if let Err(e) = self.respond(host, message, assistant).await {
            error!(
                channel_id = message.channel_id.0,
                error = %e,
                "failed to generate assistant reply"
            );
            let author = match assistant {
                Some(id) => Some(id),
                None => {
                    self.resolve_identity(host, &self.settings.fallback_ref)
                        .await
                }
            };
            if let Err(e) = self
                .post_notice(host, message.channel_id, notices::UNEXPECTED, author)
                .await
            {
                error!(error = %e, "failed to post error notice");
            }
        }
    }

    async fn respond(
        &self,
        host: &HostSession,
        message: &ChatMessage,
        assistant: Option<PartnerId>,
    ) -> Result<(), TaskchatError> {
        let channel = message.channel_id;
        let context = build_task_context(host.tasks.as_ref()).await;

        let api_key = host
            .params
            .get_param(&self.settings.api_key_param)
            .await?
            .filter(|key| !key.is_empty());

        let Some(api_key) = api_key else {
            error!(param = %self.settings.api_key_param, "Gemini API key is not configured");
            let author = match assistant {
                Some(id) => Some(id),
                None => {
                    self.resolve_identity(host, &self.settings.fallback_ref)
                        .await
                }
            };
            self.post_notice(host, channel, notices::MISSING_API_KEY, author)
                .await?;
            return Ok(());
        };

        let Some(assistant) = assistant else {
            error!(reference = %self.settings.assistant_ref, "assistant identity not found");
            let fallback = self
                .resolve_identity(host, &self.settings.fallback_ref)
                .await;
            self.post_notice(host, channel, notices::MISSING_ASSISTANT, fallback)
                .await?;
            return Ok(());
        };

        // One extra row so the trigger, which is already stored, can be dropped
        // without shortening the history.
        let history = host
            .messages
            .recent_comments(channel, self.settings.history_limit + 1)
            .await?;
        let turns = build_conversation(
            &context,
            &history,
            message,
            assistant,
            self.settings.history_limit,
        );

        let request = GenerateRequest {
            api_key: SecretString::from(api_key),
            system_instruction: self.settings.system_instruction.clone(),
            turns,
        };

        debug!(
            model = self.model.name(),
            turns = request.turns.len(),
            degraded_context = context.is_degraded(),
            "sending generation request"
        );

        match self.model.generate(request).await {
            Ok(Completion::Reply(text)) => {
                debug!(chars = text.len(), "model reply received");
                self.deliver_reply(host, channel, assistant, text).await;
                Ok(())
            }
            Ok(Completion::Empty) => {
                error!(model = self.model.name(), "model response contained no candidates");
                self.post_notice(host, channel, notices::DELIVERY_FAILED, Some(assistant))
                    .await?;
                Ok(())
            }
            Err(TaskchatError::Api { status, body }) => {
                error!(status, body = %body, "Gemini API error");
                self.post_notice(host, channel, notices::API_FAILURE, Some(assistant))
                    .await?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Posts the reply, retrying with a fixed delay between attempts.
    async fn deliver_reply(
        &self,
        host: &HostSession,
        channel: ChannelId,
        assistant: PartnerId,
        text: String,
    ) {
        let attempts = self.settings.post_attempts.max(1);

        for attempt in 1..=attempts {
            let post = OutboundPost::comment(channel, text.clone(), Some(assistant));
            match host.messages.post(post).await {
                Ok(id) => {
                    info!(message_id = id.0, attempt, "reply posted");
                    return;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "reply post attempt failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.settings.post_retry_delay).await;
                    }
                }
            }
        }

        error!("could not deliver reply after {attempts} attempts");
        if let Err(e) = self
            .post_notice(host, channel, notices::DELIVERY_FAILED, Some(assistant))
            .await
        {
            error!(error = %e, "failed to post delivery failure notice");
        }
    }

    async fn post_notice(
        &self,
        host: &HostSession,
        channel: ChannelId,
        text: &str,
        author: Option<PartnerId>,
    ) -> Result<MessageId, TaskchatError> {
        host.messages
            .post(OutboundPost::comment(channel, text, author))
            .await
    }

    async fn resolve_identity(&self, host: &HostSession, reference: &str) -> Option<PartnerId> {
        match host.identities.resolve(reference).await {
            Ok(found) => found,
            Err(e) => {
                warn!(reference, error = %e, "identity lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let config = AgentConfig {
            history_limit: 4,
            post_attempts: 5,
            post_retry_delay_ms: 20,
            system_prompt: Some("Responde en inglés".into()),
            ..AgentConfig::default()
        };
        let settings = ResponderSettings::from_config(&config);
        assert_eq!(settings.history_limit, 4);
        assert_eq!(settings.post_attempts, 5);
        assert_eq!(settings.post_retry_delay, Duration::from_millis(20));
        assert_eq!(settings.system_instruction, "Responde en inglés");
    }

    #[test]
    fn default_settings_use_fixed_instruction() {
        let settings = ResponderSettings::default();
        assert_eq!(settings.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.post_attempts, 3);
        assert_eq!(settings.post_retry_delay, Duration::from_millis(500));
        assert_eq!(settings.assistant_ref, "chatbot_ai.ai_assistant_partner");
        assert_eq!(settings.fallback_ref, "base.partner_admin");
    }

    #[test]
    fn zero_attempts_clamped() {
        let config = AgentConfig {
            post_attempts: 0,
            ..AgentConfig::default()
        };
        assert_eq!(ResponderSettings::from_config(&config).post_attempts, 1);
    }
}
