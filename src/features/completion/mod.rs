//! # Feature: Gateway Completion Client
//!
//! Client for the secondary (free-tier) chat-completions gateway: a raw
//! JSON POST with bearer auth, returning the first choice's content.
//! Fire-and-return; no streaming, no retry.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the secondary gateway's `/chat/completions`-shaped endpoint.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl GatewayClient {
    pub fn new(url: String, api_key: String, model: String) -> Self {
        GatewayClient {
            http: reqwest::Client::new(),
            url,
            api_key,
            model,
        }
    }

    /// Send a single user-role prompt and return the first choice's content.
    ///
    /// HTTP-layer, JSON-decode, and missing-choice failures all surface as
    /// errors; the command dispatcher decides whether to report or swallow
    /// them.
    pub async fn complete(&self, prompt: &str, request_id: Uuid) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            "[{request_id}] POST {} | model: {} | prompt: {} chars",
            self.url,
            self.model,
            prompt.len()
        );

        let response: ChatResponse = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("gateway response contained no choices"))?;

        debug!(
            "[{request_id}] Gateway response: {} chars",
            choice.message.content.len()
        );

        Ok(choice.message.content)
    }
}
