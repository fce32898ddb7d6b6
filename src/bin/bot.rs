use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use studybot::commands::{
    handle_message_command, handlers::QueryHandler, register_global_commands,
    register_guild_commands, CommandContext, CommandRegistry,
};
use studybot::core::Config;
use studybot::features::completion::GatewayClient;
use studybot::features::cooldown::{CommandOnCooldown, CooldownGuard};

/// Window for the /query_gpt per-(guild, user) cooldown.
const QUERY_COOLDOWN: Duration = Duration::from_secs(60);

struct Handler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(context: CommandContext, registry: CommandRegistry, guild_id: Option<GuildId>) -> Self {
        Handler {
            context: Arc::new(context),
            registry,
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Never react to our own messages (prevents self-triggering loops)
        if msg.author.id == ctx.cache.current_user_id() {
            return;
        }

        if let Some(reply) = handle_message_command(&self.context, &msg.content).await {
            if let Err(why) = msg.channel_id.say(&ctx.http, reply).await {
                error!("Failed to send reply: {why}");
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - guild commands for development (instant),
        // global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let Some(handler) = self.registry.get(&command.data.name) else {
            error!("No handler registered for command '{}'", command.data.name);
            return;
        };

        if let Err(e) = handler
            .handle(Arc::clone(&self.context), &ctx, &command)
            .await
        {
            error!(
                "Error handling slash command '{}': {}",
                command.data.name, e
            );

            // TODO: give non-cooldown errors their own message instead of
            // reporting everything with the cooldown template
            let remaining = e
                .downcast_ref::<CommandOnCooldown>()
                .map(|c| c.remaining_secs)
                .unwrap_or(0);

            if let Err(why) = command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message
                                .content(format!(
                                    "Please wait for {remaining} seconds before running the command again!"
                                ))
                                .ephemeral(true)
                        })
                })
                .await
            {
                error!("Failed to send error response: {why}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // Ensure OPENAI_API_KEY is set in environment for the openai crate
    // The openai crate reads from env vars, not from our config
    // Set both OPENAI_API_KEY and OPENAI_KEY for compatibility
    std::env::set_var("OPENAI_API_KEY", &config.openai_api_key);
    std::env::set_var("OPENAI_KEY", &config.openai_api_key);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting studybot...");

    let gateway = GatewayClient::new(
        config.gateway_url.clone(),
        config.gateway_api_key.clone(),
        config.gateway_model.clone(),
    );
    let cooldowns = CooldownGuard::new(QUERY_COOLDOWN);
    let context = CommandContext::new(gateway, cooldowns, config.openai_model.clone());

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(QueryHandler));

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler::new(context, registry, guild_id);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
