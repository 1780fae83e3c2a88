//! Completion provider trait and common types.

use async_trait::async_trait;

/// Error type for completion operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// API error.
    #[error("API error: {0}")]
    Api(String),
    /// Request error.
    #[error("request error: {0}")]
    Request(String),
    /// Response did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Trait for single-turn text-generation providers.
///
/// The pipeline sends one user-role prompt per call and reads back the
/// model's reply. Remote failures propagate to the caller; no retries.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Request a completion for a single user-role prompt.
    async fn complete(&self, prompt: &str, temperature: f32) -> CompletionResult<String>;
}
