//! Transcription provider trait and common types.

use async_trait::async_trait;
use std::path::Path;

/// Error type for transcription operations.
#[derive(Debug, thiserror::Error)]
pub enum TranscriberError {
    /// File not found.
    #[error("file not found: {0}")]
    FileNotFound(String),
    /// Unsupported format.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    /// API error.
    #[error("API error: {0}")]
    Api(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Request error.
    #[error("request error: {0}")]
    Request(String),
}

/// Result type for transcription operations.
pub type TranscribeResult<T> = Result<T, TranscriberError>;

/// Trait for audio transcription providers.
///
/// Implementations submit the audio synchronously and return the raw
/// transcript text; any remote failure propagates to the caller, there is
/// no retry logic at this layer.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Check if the provider is configured and ready.
    fn is_available(&self) -> bool;

    /// Transcribe an audio file to plain text.
    async fn transcribe(&self, path: &Path) -> TranscribeResult<String>;
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// FLAC audio.
    Flac,
    /// MP3 audio.
    Mp3,
    /// MP4/M4A audio.
    Mp4,
    /// MPEG audio.
    Mpeg,
    /// MPGA audio.
    Mpga,
    /// OGG audio (used by Telegram voice notes).
    Ogg,
    /// WAV audio.
    Wav,
    /// WebM audio.
    Webm,
}

impl AudioFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "flac" => Some(Self::Flac),
            "mp3" => Some(Self::Mp3),
            "mp4" | "m4a" => Some(Self::Mp4),
            "mpeg" => Some(Self::Mpeg),
            "mpga" => Some(Self::Mpga),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "wav" => Some(Self::Wav),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::Mp4 => "audio/mp4",
            Self::Mp3 | Self::Mpeg | Self::Mpga => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
        }
    }
}
