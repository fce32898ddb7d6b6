//! # Command System
//!
//! Message command dispatch and slash command (/) handling.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial implementation (handler trait, context, registry)

pub mod context;
pub mod handler;
pub mod handlers;
pub mod message;
pub mod registry;
pub mod slash;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;

// Re-export commonly used items from submodules
pub use message::handle_message_command;
pub use slash::{
    create_slash_commands, get_string_option, register_global_commands, register_guild_commands,
};
