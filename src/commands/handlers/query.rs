//! Query command handler
//!
//! Handles: query_gpt
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;

const SYSTEM_PROMPT: &str = "You are a helpful assistant";

pub struct QueryHandler;

#[async_trait]
impl SlashCommandHandler for QueryHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["query_gpt"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let start_time = Instant::now();

        let query = get_string_option(&command.data.options, "query")
            .ok_or_else(|| anyhow::anyhow!("Missing query argument"))?;

        // DMs share one bucket under guild id 0
        let guild_id = command.guild_id.map(|id| id.0).unwrap_or(0);
        let user_id = command.user.id.0;

        info!(
            "[{request_id}] /query_gpt command | User: {user_id} | Guild: {guild_id} | Query: {} chars",
            query.len()
        );

        // Cooldown rejections and completion failures both propagate to
        // the top-level interaction error handler in the binary.
        ctx.cooldowns.try_acquire(guild_id, user_id)?;

        let response = ctx
            .get_ai_response(SYSTEM_PROMPT, &query, request_id)
            .await?;

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(response))
            })
            .await?;

        info!(
            "[{request_id}] /query_gpt response sent | Time: {:?}",
            start_time.elapsed()
        );

        Ok(())
    }
}
