//! Scribe Bot - a Telegram voice transcription assistant.
//!
//! The bot receives a voice note or audio file, transcribes it with Groq's
//! hosted Whisper API, cleans the transcript up with a chat-completion
//! model, summarizes the cleaned text, and replies with both results.
//!
//! # Architecture
//!
//! The crate is organized around a single forward-only pipeline:
//!
//! - **Telegram** ([`telegram`]) - intake validation, file download, delivery
//! - **Transcription** ([`transcription`]) - speech-to-text provider trait + Groq Whisper
//! - **Completion** ([`completion`]) - chat-completion provider trait + Groq
//! - **Pipeline** ([`pipeline`]) - transcribe → refine → summarize orchestration
//! - **Config** ([`config`]) - environment-sourced secrets and model settings
//!
//! Each incoming message is handled on its own task; the three remote calls
//! within a request are strictly sequential and there is no shared mutable
//! state between requests.

pub mod completion;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod telegram;
pub mod transcription;
pub mod util;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::completion::{Completer, CompletionError, CompletionResult, GroqCompleter};
    pub use crate::config::BotConfig;
    pub use crate::error::{BotError, ConfigError, ConfigResult, Result};
    pub use crate::pipeline::{Pipeline, PipelineError, PipelineOutput, PipelineResult};
    pub use crate::transcription::{
        AudioFormat, GroqTranscriber, TranscribeResult, Transcriber, TranscriberError,
    };
    pub use crate::util::split_into_chunks;
}
