//! Bot configuration sourced from the process environment.
//!
//! Two secrets are required at startup: the Telegram bot token and the Groq
//! API key. Missing either is a fatal [`ConfigError`]; the process does not
//! begin serving without them. Model identifiers can be overridden through
//! optional environment variables.

use crate::error::{ConfigError, ConfigResult};

/// Default speech-to-text model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// Default chat-completion model used for refinement and summarization.
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-70b-versatile";

/// Maximum accepted attachment size in bytes (25 MiB).
pub const MAX_FILE_SIZE: u32 = 25 * 1024 * 1024;

/// Telegram's single-message length limit in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token from @BotFather.
    pub telegram_token: String,
    /// Groq API key used for both transcription and completion.
    pub groq_api_key: String,
    /// Speech-to-text model identifier.
    pub transcription_model: String,
    /// Chat-completion model identifier.
    pub completion_model: String,
    /// Maximum attachment size in bytes.
    pub max_file_size: u32,
    /// Maximum outbound message length before chunking.
    pub max_message_length: usize,
}

impl BotConfig {
    /// Create a config with the given secrets and default models and limits.
    #[must_use]
    pub fn new(telegram_token: impl Into<String>, groq_api_key: impl Into<String>) -> Self {
        Self {
            telegram_token: telegram_token.into(),
            groq_api_key: groq_api_key.into(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            max_file_size: MAX_FILE_SIZE,
            max_message_length: MAX_MESSAGE_LENGTH,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `TELEGRAM_BOT_TOKEN` or
    /// `GROQ_API_KEY` is not set.
    pub fn from_env() -> ConfigResult<Self> {
        let telegram_token = require_env("TELEGRAM_BOT_TOKEN")?;
        let groq_api_key = require_env("GROQ_API_KEY")?;

        let mut config = Self::new(telegram_token, groq_api_key);

        if let Ok(model) = std::env::var("SCRIBE_TRANSCRIPTION_MODEL") {
            config.transcription_model = model;
        }
        if let Ok(model) = std::env::var("SCRIBE_COMPLETION_MODEL") {
            config.completion_model = model;
        }

        Ok(config)
    }

    /// Set the speech-to-text model.
    #[must_use]
    pub fn with_transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    /// Set the chat-completion model.
    #[must_use]
    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }
}

fn require_env(name: &str) -> ConfigResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing(name))
}
