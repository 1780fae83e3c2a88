//! Telegram intake and delivery using teloxide.
//!
//! The dispatcher routes two kinds of updates: the `/start` command and any
//! message carrying a voice note or audio attachment. Everything else is
//! ignored. Each qualifying message is validated, downloaded into a scoped
//! temporary file, run through the pipeline, and answered with the refined
//! transcript followed by the summary, both chunked to Telegram's message
//! length limit.
//!
//! The temporary file is owned by the request as a [`TempPath`] and is
//! deleted on every exit path when it drops.

use crate::completion::{Completer, GroqCompleter};
use crate::config::BotConfig;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineError, PipelineResult};
use crate::transcription::{GroqTranscriber, Transcriber};
use crate::util::split_into_chunks;
use std::path::Path;
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

/// Static reply to the `/start` command.
pub const WELCOME_TEXT: &str = "Welcome! Send me a voice message or an audio file (up to 25MB), \
                                and I'll transcribe, improve, and summarize it for you.";

/// Acknowledgment sent before the pipeline starts.
pub const PROCESSING_TEXT: &str = "Processing your audio. This may take a moment...";

/// Rejection for messages without a voice note or audio attachment.
pub const WRONG_TYPE_TEXT: &str = "Please send a voice message or an audio file.";

/// Rejection for attachments over the size limit.
pub const TOO_LARGE_TEXT: &str = "The file is too large. Please send an audio file up to 25MB.";

/// Commands understood by the bot.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    /// Show the welcome message.
    Start,
}

/// Audio attachment metadata, extracted before any download happens.
#[derive(Debug, Clone)]
pub struct IncomingAudio {
    /// Telegram file identifier used to fetch the content.
    pub file_id: String,
    /// Declared size in bytes.
    pub size: u32,
    /// Extension for the local temp file ("ogg" for voice notes).
    pub extension: String,
}

impl IncomingAudio {
    /// Extract attachment metadata from a message, if it carries audio.
    ///
    /// Voice notes always use the `ogg` extension; audio files keep the
    /// extension of their file name, falling back to `ogg` when absent.
    #[must_use]
    pub fn from_message(msg: &Message) -> Option<Self> {
        if let Some(voice) = msg.voice() {
            Some(Self {
                file_id: voice.file.id.clone(),
                size: voice.file.size,
                extension: "ogg".to_string(),
            })
        } else if let Some(audio) = msg.audio() {
            Some(Self {
                file_id: audio.file.id.clone(),
                size: audio.file.size,
                extension: extension_of(audio.file_name.as_deref()),
            })
        } else {
            None
        }
    }

    /// Whether the declared size exceeds the given limit.
    #[must_use]
    pub const fn exceeds(&self, max_bytes: u32) -> bool {
        self.size > max_bytes
    }
}

/// Lower-cased extension of a file name, defaulting to `ogg`.
fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "ogg".to_string())
}

/// Create a uniquely named temporary file carrying the source extension.
fn temp_audio_file(extension: &str) -> std::io::Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("scribe-")
        .suffix(&format!(".{extension}"))
        .tempfile()?;
    Ok(file.into_temp_path())
}

/// Abstraction over the reply transport.
///
/// The delivery flow only ever sends ordered text replies to one chat, so
/// it is written against this trait and exercised with a recording fake in
/// tests; [`BotReplies`] is the production implementation.
#[async_trait::async_trait]
trait ReplySink: Send + Sync {
    /// Send one reply message to the request's chat.
    async fn send(&self, text: String) -> ResponseResult<()>;
}

/// Reply sink backed by the Telegram bot API.
struct BotReplies {
    bot: Bot,
    chat_id: ChatId,
}

#[async_trait::async_trait]
impl ReplySink for BotReplies {
    async fn send(&self, text: String) -> ResponseResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}

/// Run the pipeline on a downloaded file and deliver the results.
///
/// Sends the processing acknowledgment, then the refined-transcript chunks
/// followed by the summary chunks. Any pipeline failure is absorbed here
/// and answered with exactly one error reply; only transport failures
/// propagate.
async fn process_audio(
    replies: &dyn ReplySink,
    pipeline: &Pipeline,
    audio_path: &Path,
    max_message_length: usize,
) -> ResponseResult<()> {
    replies.send(PROCESSING_TEXT.to_string()).await?;

    match pipeline.run(audio_path).await {
        Ok(output) => {
            for chunk in split_into_chunks(&output.transcript, max_message_length) {
                replies.send(chunk).await?;
            }
            for chunk in split_into_chunks(&output.summary, max_message_length) {
                replies.send(chunk).await?;
            }
        }
        Err(e) => {
            error!(error = %e, "pipeline failed");
            replies.send(format!("An error occurred: {e}")).await?;
        }
    }

    Ok(())
}

/// Download the attachment into a fresh temporary file.
async fn download_audio(bot: &Bot, audio: &IncomingAudio) -> PipelineResult<TempPath> {
    let file = bot
        .get_file(&audio.file_id)
        .await
        .map_err(|e| PipelineError::Download(e.to_string()))?;

    let temp = temp_audio_file(&audio.extension)?;
    let mut dst = tokio::fs::File::create(&temp).await?;
    bot.download_file(&file.path, &mut dst)
        .await
        .map_err(|e| PipelineError::Download(e.to_string()))?;
    dst.flush().await?;

    debug!(path = %temp.display(), bytes = audio.size, "attachment downloaded");
    Ok(temp)
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
        }
    }
    Ok(())
}

async fn handle_audio(
    bot: Bot,
    msg: Message,
    pipeline: Arc<Pipeline>,
    config: Arc<BotConfig>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    let Some(audio) = IncomingAudio::from_message(&msg) else {
        debug!(chat_id = chat_id.0, "message carries no audio attachment");
        bot.send_message(chat_id, WRONG_TYPE_TEXT).await?;
        return Ok(());
    };

    // Expected condition, not an error: reject before any download.
    if audio.exceeds(config.max_file_size) {
        debug!(size = audio.size, "attachment over size limit");
        bot.send_message(chat_id, TOO_LARGE_TEXT).await?;
        return Ok(());
    }

    let temp = match download_audio(&bot, &audio).await {
        Ok(temp) => temp,
        Err(e) => {
            error!(error = %e, chat_id = chat_id.0, "attachment download failed");
            bot.send_message(chat_id, format!("An error occurred: {e}"))
                .await?;
            return Ok(());
        }
    };

    let replies = BotReplies { bot, chat_id };
    process_audio(&replies, &pipeline, &temp, config.max_message_length).await?;

    // `temp` drops here, removing the file on success and failure alike.
    Ok(())
}

/// Build the providers and run the dispatcher until shutdown.
pub async fn run(config: BotConfig) -> Result<()> {
    let bot = Bot::new(&config.telegram_token);

    let transcriber: Arc<dyn Transcriber> = Arc::new(GroqTranscriber::new(
        &config.groq_api_key,
        &config.transcription_model,
    ));
    let completer: Arc<dyn Completer> = Arc::new(GroqCompleter::new(
        &config.groq_api_key,
        &config.completion_model,
    ));
    let pipeline = Arc::new(Pipeline::new(transcriber, completer));
    let config = Arc::new(config);

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter(|msg: Message| msg.voice().is_some() || msg.audio().is_some())
                .endpoint(handle_audio),
        );

    info!("telegram dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![pipeline, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("telegram dispatcher stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FILE_SIZE;

    fn attachment(size: u32) -> IncomingAudio {
        IncomingAudio {
            file_id: "file-123".to_string(),
            size,
            extension: "ogg".to_string(),
        }
    }

    #[test]
    fn test_size_limit_boundary() {
        // One byte over is rejected; exactly at the limit proceeds.
        assert!(attachment(MAX_FILE_SIZE + 1).exceeds(MAX_FILE_SIZE));
        assert!(!attachment(MAX_FILE_SIZE).exceeds(MAX_FILE_SIZE));
        assert!(!attachment(1024).exceeds(MAX_FILE_SIZE));
    }

    #[test]
    fn test_extension_derivation() {
        assert_eq!(extension_of(Some("meeting.mp3")), "mp3");
        assert_eq!(extension_of(Some("Interview.M4A")), "m4a");
        assert_eq!(extension_of(Some("noextension")), "ogg");
        assert_eq!(extension_of(None), "ogg");
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let temp = temp_audio_file("ogg").expect("temp file");
        let path = temp.to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("ogg"));

        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn test_welcome_text_is_static() {
        assert!(WELCOME_TEXT.starts_with("Welcome!"));
        assert!(WELCOME_TEXT.len() <= 4096);
    }

    use crate::completion::{CompletionError, CompletionResult};
    use crate::transcription::{TranscribeResult, TranscriberError};
    use std::sync::Mutex;

    /// Records every reply instead of talking to Telegram.
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }

        fn messages(&self) -> Vec<String> {
            self.messages.lock().expect("sink lock").clone()
        }
    }

    #[async_trait::async_trait]
    impl ReplySink for RecordingSink {
        async fn send(&self, text: String) -> ResponseResult<()> {
            self.messages.lock().expect("sink lock").push(text);
            Ok(())
        }
    }

    struct StaticTranscriber {
        text: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl Transcriber for StaticTranscriber {
        fn name(&self) -> &str {
            "static"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn transcribe(&self, _path: &Path) -> TranscribeResult<String> {
            self.text
                .map(str::to_string)
                .ok_or_else(|| TranscriberError::Api("HTTP 502: bad gateway".to_string()))
        }
    }

    /// Returns a fixed reply per call, in order.
    struct ScriptedCompleter {
        replies: Vec<&'static str>,
        calls: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl Completer for ScriptedCompleter {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str, _temperature: f32) -> CompletionResult<String> {
            let mut calls = self.calls.lock().expect("completer lock");
            let reply = self
                .replies
                .get(*calls)
                .ok_or_else(|| CompletionError::Api("HTTP 429: too many".to_string()))?;
            *calls += 1;
            Ok((*reply).to_string())
        }
    }

    fn test_pipeline(transcript: Option<&'static str>, replies: Vec<&'static str>) -> Pipeline {
        Pipeline::new(
            Arc::new(StaticTranscriber { text: transcript }),
            Arc::new(ScriptedCompleter {
                replies,
                calls: Mutex::new(0),
            }),
        )
    }

    #[tokio::test]
    async fn test_delivery_order_notice_then_transcript_then_summary() {
        let pipeline = test_pipeline(Some("raw"), vec!["refined text", "- summary point"]);
        let sink = RecordingSink::new();
        let temp = temp_audio_file("ogg").expect("temp file");
        let path = temp.to_path_buf();

        process_audio(&sink, &pipeline, &temp, 4096)
            .await
            .expect("delivery succeeds");
        drop(temp);

        let messages = sink.messages();
        assert_eq!(
            messages,
            vec![PROCESSING_TEXT, "refined text", "- summary point"]
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_long_results_arrive_as_ordered_chunks() {
        let pipeline = test_pipeline(Some("raw"), vec!["abcdefgh", "12345"]);
        let sink = RecordingSink::new();
        let temp = temp_audio_file("ogg").expect("temp file");

        process_audio(&sink, &pipeline, &temp, 4).await.expect("delivery succeeds");

        let messages = sink.messages();
        assert_eq!(messages, vec![PROCESSING_TEXT, "abcd", "efgh", "1234", "5"]);
    }

    #[tokio::test]
    async fn test_transcription_failure_sends_exactly_one_error_reply() {
        let pipeline = test_pipeline(None, vec!["never used", "never used"]);
        let sink = RecordingSink::new();
        let temp = temp_audio_file("ogg").expect("temp file");
        let path = temp.to_path_buf();

        process_audio(&sink, &pipeline, &temp, 4096)
            .await
            .expect("failure is absorbed");
        drop(temp);

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], PROCESSING_TEXT);

        let error_replies: Vec<_> = messages
            .iter()
            .filter(|m| m.starts_with("An error occurred:"))
            .collect();
        assert_eq!(error_replies.len(), 1);
        assert!(error_replies[0].contains("HTTP 502"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_summarization_failure_sends_exactly_one_error_reply() {
        // One scripted reply: refinement succeeds, summarization fails.
        let pipeline = test_pipeline(Some("raw"), vec!["refined text"]);
        let sink = RecordingSink::new();
        let temp = temp_audio_file("ogg").expect("temp file");

        process_audio(&sink, &pipeline, &temp, 4096)
            .await
            .expect("failure is absorbed");

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], PROCESSING_TEXT);
        assert!(messages[1].starts_with("An error occurred:"));
    }
}
