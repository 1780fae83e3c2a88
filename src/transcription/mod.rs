//! Audio transcription for voice message support.
//!
//! Defines the [`Transcriber`] trait used by the pipeline and the Groq
//! Whisper provider that implements it.

mod groq;
mod provider;

pub use groq::GroqTranscriber;
pub use provider::{AudioFormat, TranscribeResult, Transcriber, TranscriberError};
