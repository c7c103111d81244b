//! Application entry point — terminal voice assistant.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from the path given on the command line, or from the
//!    per-user settings file (defaults on first run).
//! 3. Build the transcriber, responder and synthesizer from config.
//! 4. Read commands from stdin, one per line:
//!    * a path to a WAV file — evaluate it as the next captured clip;
//!    * `reset` — start the conversation over;
//!    * `quit` (or end of input) — exit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use voice_assistant::{
    audio::{CapturedClip, ClipSequence},
    config::AppConfig,
    conversation::ConversationState,
    display::TerminalSink,
    llm::ChatCompletionsResponder,
    pipeline::{PipelineController, TurnOutcome},
    stt::WhisperTranscriber,
    tts::GoogleTranslateSynthesizer,
};

fn load_config() -> AppConfig {
    let loaded = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::load_from(&path),
        None => AppConfig::load(),
    };
    loaded
        .unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        })
        .with_env_api_key()
}

fn read_clip(seq: &mut ClipSequence, path: &str) -> anyhow::Result<CapturedClip> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    let clip = CapturedClip::from_wav(seq.next_id(), bytes)
        .with_context(|| format!("decoding {path}"))?;
    Ok(clip)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("voice assistant starting up");

    let config = load_config();
    if config.api.api_key.as_deref().map_or(true, str::is_empty) {
        log::warn!("No API key configured; transcription and replies will be rejected");
    }

    let mut controller = PipelineController::new(
        Arc::new(WhisperTranscriber::from_config(&config.api, &config.transcriber)),
        Arc::new(ChatCompletionsResponder::from_config(&config.api, &config.responder)),
        Arc::new(GoogleTranslateSynthesizer::from_config(&config.api, &config.synthesizer)),
        Box::new(TerminalSink::stdout(config.playback.clone())),
        config.synthesizer.language.clone(),
    );
    let mut state = ConversationState::from_config(&config.responder);
    let mut seq = ClipSequence::new();

    log::info!(
        "model {}, speaking {}; enter a WAV path, `reset` or `quit`",
        state.selected_model(),
        config.synthesizer.language
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                state.reset();
                controller.sink_mut().render(state.display_log());
            }
            path => {
                let clip = match read_clip(&mut seq, path) {
                    Ok(clip) => clip,
                    Err(e) => {
                        log::warn!("{e:#}");
                        continue;
                    }
                };
                match controller.evaluate(&clip, &mut state).await {
                    Ok(TurnOutcome::Completed { .. }) => {}
                    Ok(outcome) => log::info!("clip {}: {outcome:?}", clip.id()),
                    // Already reported by the sink; keep the session going.
                    Err(e) => log::debug!("turn failed: {e}"),
                }
            }
        }
    }

    log::info!("voice assistant shutting down");
    Ok(())
}
