//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with completion clients and cooldowns

use anyhow::Result;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use uuid::Uuid;

use crate::features::completion::GatewayClient;
use crate::features::cooldown::CooldownGuard;

/// Shared context for all command handlers
///
/// Contains the services needed by the command layer:
/// - GatewayClient for the secondary (free-tier) completion service
/// - CooldownGuard for the /query_gpt per-(guild, user) cooldown
/// - Primary completion model configuration
#[derive(Clone)]
pub struct CommandContext {
    pub gateway: GatewayClient,
    pub cooldowns: CooldownGuard,
    pub openai_model: String,
}

impl CommandContext {
    pub fn new(gateway: GatewayClient, cooldowns: CooldownGuard, openai_model: String) -> Self {
        Self {
            gateway,
            cooldowns,
            openai_model,
        }
    }

    /// Get a single-turn response from the primary completion service.
    ///
    /// Builds a system + user message pair and returns the first choice's
    /// content. Errors are not handled here; they propagate to the
    /// top-level command-error handler in the binary.
    pub async fn get_ai_response(
        &self,
        system_prompt: &str,
        user_message: &str,
        request_id: Uuid,
    ) -> Result<String> {
        let messages = vec![
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::System,
                content: Some(system_prompt.to_string()),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::User,
                content: Some(user_message.to_string()),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
        ];

        debug!(
            "[{request_id}] Sending {} messages to primary API | model: {}",
            messages.len(),
            self.openai_model
        );

        let completion = ChatCompletion::builder(&self.openai_model, messages)
            .create()
            .await?;

        let response = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!("[{request_id}] Got response: {} chars", response.len());

        Ok(response)
    }
}
