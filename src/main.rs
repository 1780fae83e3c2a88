//! Scribe Bot CLI - Telegram voice transcription assistant.

use clap::Parser;
use scribe_bot::config::BotConfig;
use scribe_bot::error::Result;
use scribe_bot::telegram;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Scribe Bot - transcribe, refine, and summarize Telegram voice messages
#[derive(Debug, Parser)]
#[command(name = "scribe-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scribe_bot={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run() -> Result<()> {
    // Secrets may live in a local .env file; a missing file is fine.
    let _ = dotenvy::dotenv();

    let config = BotConfig::from_env()?;

    tracing::info!(
        transcription_model = %config.transcription_model,
        completion_model = %config.completion_model,
        "configuration loaded"
    );

    tokio::select! {
        result = telegram::run(config) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
