//! The transcribe → refine → summarize pipeline.
//!
//! Data flows strictly forward: the raw transcript feeds refinement, the
//! refined transcript feeds summarization. The three remote calls are
//! sequential, there are no retries, and the first failure short-circuits
//! the rest of the run. Providers are injected so tests can substitute
//! fakes for the remote APIs.

use crate::completion::{Completer, CompletionError};
use crate::transcription::{Transcriber, TranscriberError};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Sampling temperature for refinement and summarization.
const COMPLETION_TEMPERATURE: f32 = 0.3;

/// Error type for a single pipeline run.
///
/// This is the one well-typed error the delivery layer catches and turns
/// into a user-visible message.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Attachment download from the messaging platform failed.
    #[error("download failed: {0}")]
    Download(String),
    /// Speech-to-text call failed.
    #[error("transcription failed: {0}")]
    Transcribe(#[from] TranscriberError),
    /// Refinement or summarization call failed.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
    /// Local IO failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The two texts produced by a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Refined transcript, delivered first.
    pub transcript: String,
    /// Bullet-style summary of the refined transcript.
    pub summary: String,
}

/// Orchestrates the three remote calls for one audio file.
#[derive(Clone)]
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    completer: Arc<dyn Completer>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("transcriber", &self.transcriber.name())
            .field("completer", &self.completer.name())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline over the given providers.
    #[must_use]
    pub fn new(transcriber: Arc<dyn Transcriber>, completer: Arc<dyn Completer>) -> Self {
        Self {
            transcriber,
            completer,
        }
    }

    /// Run the full pipeline on a local audio file.
    ///
    /// # Errors
    ///
    /// Returns the first step's failure; later steps are never invoked
    /// after a failure.
    pub async fn run(&self, audio: &Path) -> PipelineResult<PipelineOutput> {
        let raw = self.transcriber.transcribe(audio).await?;
        debug!(raw_len = raw.len(), "raw transcript received");

        let transcript = self
            .completer
            .complete(&refine_prompt(&raw), COMPLETION_TEMPERATURE)
            .await?;
        debug!(refined_len = transcript.len(), "transcript refined");

        let summary = self
            .completer
            .complete(&summary_prompt(&transcript), COMPLETION_TEMPERATURE)
            .await?;

        info!(
            transcript_len = transcript.len(),
            summary_len = summary.len(),
            "pipeline complete"
        );

        Ok(PipelineOutput {
            transcript,
            summary,
        })
    }
}

/// Instruction prompt for transcript cleanup.
fn refine_prompt(transcript: &str) -> String {
    format!(
        "Please improve the following transcription, fixing any errors and \
         making it more readable in the target language. Only return the \
         text, no further comments.\n\n{transcript}\n\nImproved transcription:"
    )
}

/// Instruction prompt for the bullet-point summary.
fn summary_prompt(transcript: &str) -> String {
    format!(
        "Please provide a concise summary of the following transcription in \
         the target language. If possible return bullet points. Write it out \
         of the perspective of the transcript.\n\n{transcript}\n\nSummary:"
    )
}
