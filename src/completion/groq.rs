//! Groq chat-completions provider.
//!
//! Sends a single user-role message to Groq's OpenAI-compatible chat
//! endpoint and decodes the typed response once at this boundary, so the
//! caller only ever sees a [`CompletionError`] with a readable cause.

use super::provider::{Completer, CompletionError, CompletionResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Groq chat completions endpoint.
const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq chat-completion provider.
#[derive(Debug, Clone)]
pub struct GroqCompleter {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl GroqCompleter {
    /// Create a new Groq completer with an API key and model identifier.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn extract_reply(response: ChatResponse) -> CompletionResult<String> {
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Malformed("response contained no choices".to_string()))
    }
}

#[async_trait]
impl Completer for GroqCompleter {
    fn name(&self) -> &str {
        "groq-chat"
    }

    async fn complete(&self, prompt: &str, temperature: f32) -> CompletionResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        debug!(model = %self.model, temperature, prompt_len = prompt.len(), "requesting completion");

        let response = self
            .client
            .post(GROQ_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CompletionError::Api(format!("HTTP {status}: {body}")));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let reply = Self::extract_reply(decoded)?;
        info!(reply_len = reply.len(), "completion received");

        Ok(reply)
    }
}
