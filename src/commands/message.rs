//! Message command dispatcher
//!
//! Classifies plain chat messages into the fixed command set (`hi`,
//! `summarize`, `questions`) and executes them against the text extractor
//! and the secondary completion gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use log::{error, info};
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::features::extract;

/// Fixed reply to the greeting command.
const GREETING_REPLY: &str = "helloooooooo :)";

/// Default word count when `summarize` is given no usable count.
const DEFAULT_SUMMARY_WORDS: i64 = 400;

/// Inclusive bounds on the `summarize` word count.
const MIN_SUMMARY_WORDS: i64 = 100;
const MAX_SUMMARY_WORDS: i64 = 1000;

const RANGE_ERROR: &str = "Number of words should be between 100 and 1000.";
const QUESTIONS_FORMAT_ERROR: &str =
    "Invalid command format. Please use 'questions [number] (text)' to generate questions.";

/// A classified message command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageCommand {
    Greet,
    Summarize { word_count: i64, body: String },
    Questions { count: i64, body: String },
}

/// Result of classifying one incoming message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A well-formed command to execute.
    Command(MessageCommand),
    /// A recognized command with bad arguments; the string is the
    /// user-visible error. No external call is made.
    Invalid(String),
    /// Not one of ours; produces no reply and no error.
    NotACommand,
}

/// Classify message content into at most one command.
///
/// Matching is case-insensitive: `hi` by whole-content equality, the
/// others by prefix. Tokenization is plain whitespace splitting; body
/// tokens are re-joined with single spaces.
pub fn classify(content: &str) -> ParseOutcome {
    if content.eq_ignore_ascii_case("hi") {
        return ParseOutcome::Command(MessageCommand::Greet);
    }

    let lowered = content.to_lowercase();
    let tokens: Vec<&str> = content.split_whitespace().collect();

    if lowered.starts_with("summarize") {
        return classify_summarize(&tokens);
    }

    if lowered.starts_with("questions") {
        return classify_questions(&tokens);
    }

    ParseOutcome::NotACommand
}

fn classify_summarize(tokens: &[&str]) -> ParseOutcome {
    match tokens.get(1) {
        // Bare "summarize": default count, empty body
        None => ParseOutcome::Command(MessageCommand::Summarize {
            word_count: DEFAULT_SUMMARY_WORDS,
            body: String::new(),
        }),
        Some(token) => match token.parse::<i64>() {
            Ok(n) if (MIN_SUMMARY_WORDS..=MAX_SUMMARY_WORDS).contains(&n) => {
                ParseOutcome::Command(MessageCommand::Summarize {
                    word_count: n,
                    body: tokens[2..].join(" "),
                })
            }
            Ok(_) => ParseOutcome::Invalid(RANGE_ERROR.to_string()),
            // Unparseable count: fall back to the default and keep
            // token[1] as part of the body. Note the body boundary
            // differs from the absent-count case above.
            Err(_) => ParseOutcome::Command(MessageCommand::Summarize {
                word_count: DEFAULT_SUMMARY_WORDS,
                body: tokens[1..].join(" "),
            }),
        },
    }
}

fn classify_questions(tokens: &[&str]) -> ParseOutcome {
    match tokens.get(1).map(|token| token.parse::<i64>()) {
        Some(Ok(n)) => ParseOutcome::Command(MessageCommand::Questions {
            count: n,
            body: tokens[2..].join(" "),
        }),
        // Missing or unparseable count: format error, no default
        _ => ParseOutcome::Invalid(QUESTIONS_FORMAT_ERROR.to_string()),
    }
}

fn summary_prompt(word_count: i64, text: &str) -> String {
    format!(
        "You are a helpful assistant that will follow my directions exactly. \
         Summarize the following, make sure the summary is concise. \
         Only write {word_count} words, and do not exceed 2000 characters. \
         Do not give me other information outside of those paragraphs: {text}."
    )
}

fn questions_prompt(count: i64, text: &str) -> String {
    format!(
        "You are a helpful assistant. Generate {count} questions based on the following. \
         Do not use any other reference, only utilize the text given here: {text}. \
         When generating your response, do not write anything else. Only send the questions. \
         When generating questions, space them out with one single line break, do not use multiple."
    )
}

/// Handle one incoming message, returning at most one reply.
///
/// The caller (the event handler) is the single reply-emission point;
/// `None` means stay silent. Gateway completion failures are logged and
/// swallowed on purpose, while fetch failures and argument errors are
/// reported to the user.
pub async fn handle_message_command(ctx: &CommandContext, content: &str) -> Option<String> {
    let command = match classify(content) {
        ParseOutcome::NotACommand => return None,
        ParseOutcome::Invalid(reply) => return Some(reply),
        ParseOutcome::Command(command) => command,
    };

    match command {
        MessageCommand::Greet => Some(GREETING_REPLY.to_string()),
        MessageCommand::Summarize { word_count, body } => {
            let request_id = Uuid::new_v4();
            info!("[{request_id}] summarize command | words: {word_count} | body: {} chars", body.len());
            run_gateway_command(ctx, request_id, &body, |text| {
                summary_prompt(word_count, text)
            })
            .await
        }
        MessageCommand::Questions { count, body } => {
            let request_id = Uuid::new_v4();
            info!("[{request_id}] questions command | count: {count} | body: {} chars", body.len());
            run_gateway_command(ctx, request_id, &body, |text| questions_prompt(count, text))
            .await
        }
    }
}

/// Shared tail of the summarize/questions paths: extract, prompt, complete.
async fn run_gateway_command(
    ctx: &CommandContext,
    request_id: Uuid,
    body: &str,
    build_prompt: impl FnOnce(&str) -> String,
) -> Option<String> {
    let text = match extract::resolve(body).await {
        Ok(text) => text,
        Err(e) => return Some(format!("Error: {e}")),
    };

    match ctx.gateway.complete(&build_prompt(&text), request_id).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            // Intentionally swallowed: the user gets no reply on gateway
            // failure, unlike the argument-error paths above.
            error!("[{request_id}] Gateway completion failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(content: &str) -> MessageCommand {
        match classify(content) {
            ParseOutcome::Command(command) => command,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    fn invalid(content: &str) -> String {
        match classify(content) {
            ParseOutcome::Invalid(reply) => reply,
            other => panic!("expected an invalid outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_greet_any_case() {
        assert_eq!(command("hi"), MessageCommand::Greet);
        assert_eq!(command("HI"), MessageCommand::Greet);
        assert_eq!(command("Hi"), MessageCommand::Greet);
    }

    #[test]
    fn test_greet_requires_exact_content() {
        assert_eq!(classify("hi there"), ParseOutcome::NotACommand);
    }

    #[test]
    fn test_unrecognized_content_is_silent() {
        assert_eq!(classify("hello bot"), ParseOutcome::NotACommand);
        assert_eq!(classify(""), ParseOutcome::NotACommand);
    }

    #[test]
    fn test_summarize_with_count_and_body() {
        assert_eq!(
            command("summarize 200 https://example.com"),
            MessageCommand::Summarize {
                word_count: 200,
                body: "https://example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_summarize_count_bounds_inclusive() {
        for count in [100, 1000] {
            assert_eq!(
                command(&format!("summarize {count} text")),
                MessageCommand::Summarize {
                    word_count: count,
                    body: "text".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_summarize_count_out_of_range() {
        for count in [99, 1001, -5, 0] {
            assert_eq!(
                invalid(&format!("summarize {count} text")),
                "Number of words should be between 100 and 1000."
            );
        }
    }

    #[test]
    fn test_summarize_missing_count_defaults_with_empty_body() {
        assert_eq!(
            command("summarize"),
            MessageCommand::Summarize {
                word_count: 400,
                body: String::new(),
            }
        );
    }

    #[test]
    fn test_summarize_unparseable_count_keeps_token_in_body() {
        // Fallback boundary: the non-numeric token is part of the body
        assert_eq!(
            command("summarize some long article text"),
            MessageCommand::Summarize {
                word_count: 400,
                body: "some long article text".to_string(),
            }
        );
    }

    #[test]
    fn test_summarize_prefix_is_case_insensitive() {
        assert_eq!(
            command("SUMMARIZE 500 text"),
            MessageCommand::Summarize {
                word_count: 500,
                body: "text".to_string(),
            }
        );
    }

    #[test]
    fn test_summarize_body_joined_with_single_spaces() {
        assert_eq!(
            command("summarize 200 several   words\there"),
            MessageCommand::Summarize {
                word_count: 200,
                body: "several words here".to_string(),
            }
        );
    }

    #[test]
    fn test_questions_with_count_and_body() {
        assert_eq!(
            command("questions 5 hello world"),
            MessageCommand::Questions {
                count: 5,
                body: "hello world".to_string(),
            }
        );
    }

    #[test]
    fn test_questions_missing_count_is_format_error() {
        assert_eq!(
            invalid("questions"),
            "Invalid command format. Please use 'questions [number] (text)' to generate questions."
        );
    }

    #[test]
    fn test_questions_unparseable_count_is_format_error() {
        assert_eq!(
            invalid("questions abc hello world"),
            "Invalid command format. Please use 'questions [number] (text)' to generate questions."
        );
    }

    #[test]
    fn test_prompts_interpolate_count_and_text() {
        let summary = summary_prompt(250, "the page text");
        assert!(summary.contains("Only write 250 words"));
        assert!(summary.contains("the page text"));

        let questions = questions_prompt(7, "the page text");
        assert!(questions.contains("Generate 7 questions"));
        assert!(questions.contains("the page text"));
    }
}
