//! Chat-completion support for transcript refinement and summarization.
//!
//! Defines the [`Completer`] trait used by the pipeline and the Groq
//! chat-completions provider that implements it.

mod groq;
mod provider;

pub use groq::GroqCompleter;
pub use provider::{Completer, CompletionError, CompletionResult};
