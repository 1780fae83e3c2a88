//! Groq Whisper transcription provider.
//!
//! Submits audio files to Groq's hosted Whisper API and returns the
//! plain-text transcript. Transcription is requested at zero temperature
//! so repeated runs yield the most-likely decoding.

use super::provider::{AudioFormat, TranscribeResult, Transcriber, TranscriberError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};

/// Groq Whisper API endpoint.
const GROQ_WHISPER_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Groq transcription provider using Whisper.
#[derive(Debug, Clone)]
pub struct GroqTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqTranscriber {
    /// Create a new Groq transcriber with an API key and model identifier.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    fn name(&self) -> &str {
        "groq-whisper"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn transcribe(&self, path: &Path) -> TranscribeResult<String> {
        if !path.exists() {
            return Err(TranscriberError::FileNotFound(path.display().to_string()));
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("ogg");
        let format = AudioFormat::from_extension(extension)
            .ok_or_else(|| TranscriberError::UnsupportedFormat(extension.to_string()))?;

        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.ogg")
            .to_string();

        debug!(path = %path.display(), format = ?format, bytes = data.len(), "transcribing audio file");

        let file_part = Part::bytes(data)
            .file_name(filename)
            .mime_str(format.mime_type())
            .map_err(|e| TranscriberError::Request(e.to_string()))?;

        // Plain-text output at zero temperature: the response body is the
        // transcript itself, no JSON envelope to unwrap.
        let form = Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text("temperature", "0");

        let response = self
            .client
            .post(GROQ_WHISPER_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriberError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriberError::Api(format!("HTTP {status}: {body}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TranscriberError::Request(e.to_string()))?;
        let text = text.trim().to_string();

        info!(text_len = text.len(), "transcription complete");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcriber_creation() {
        let transcriber = GroqTranscriber::new("test-key", "whisper-large-v3");
        assert_eq!(transcriber.name(), "groq-whisper");
        assert_eq!(transcriber.model, "whisper-large-v3");
        assert!(transcriber.is_available());
    }

    #[test]
    fn test_empty_key_is_not_available() {
        let transcriber = GroqTranscriber::new("", "whisper-large-v3");
        assert!(!transcriber.is_available());
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected_before_any_request() {
        let transcriber = GroqTranscriber::new("test-key", "whisper-large-v3");
        let err = transcriber
            .transcribe(Path::new("/nonexistent/audio.ogg"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriberError::FileNotFound(_)));
    }
}
