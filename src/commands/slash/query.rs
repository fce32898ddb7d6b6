//! # Query Command
//!
//! Ask the primary completion service a single-turn question.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_query_command()]
}

fn create_query_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("query_gpt")
        .description("Ask GPT a question")
        .create_option(|option| {
            option
                .name("query")
                .description("Ask GPT a question")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_query_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let query = &commands[0];
        let name = query.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "query_gpt");
    }

    #[test]
    fn test_query_option_is_required() {
        let commands = create_commands();
        let options = commands[0].0.get("options").unwrap().as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].get("name").unwrap().as_str().unwrap(), "query");
        assert!(options[0].get("required").unwrap().as_bool().unwrap());
    }
}
