//! Unified error types for scribe-bot.
//!
//! Per-request errors live next to their modules ([`TranscriberError`],
//! [`CompletionError`], [`PipelineError`]) and are absorbed at the delivery
//! boundary; this module provides the configuration error raised at startup
//! and the top-level [`BotError`] returned from the entry point.
//!
//! [`TranscriberError`]: crate::transcription::TranscriberError
//! [`CompletionError`]: crate::completion::CompletionError
//! [`PipelineError`]: crate::pipeline::PipelineError

/// The main error type for scribe-bot operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration error, fatal at startup.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for scribe-bot operations.
pub type Result<T> = std::result::Result<T, BotError>;

/// Error type for configuration loading.
///
/// Raised before the bot begins serving; a missing secret is fatal rather
/// than a per-request condition.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("missing required environment variable: {0}")]
    Missing(String),

    /// Invalid value.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a missing variable error.
    #[inline]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing(name.into())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let cfg_err = ConfigError::missing("GROQ_API_KEY");
        let bot_err: BotError = cfg_err.into();
        assert!(matches!(bot_err, BotError::Config(_)));
    }

    #[test]
    fn test_missing_secret_display() {
        let err = ConfigError::missing("TELEGRAM_BOT_TOKEN");
        assert_eq!(
            err.to_string(),
            "missing required environment variable: TELEGRAM_BOT_TOKEN"
        );
    }
}
