//! Terminal front-end: prints the conversation and hands replies to an
//! external audio player.
//!
//! Synthesized audio is written to a scratch file that exists only while the
//! player runs; the file is removed when the call returns, whether or not
//! playback succeeded.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::PlaybackConfig;
use crate::conversation::{DisplayEntry, Speaker};
use crate::pipeline::PipelineError;
use crate::tts::SynthesizedAudio;

use super::{DisplaySink, PlaybackError};

/// Renders to any writer (stdout in the binary).
pub struct TerminalSink<W: Write + Send> {
    out: W,
    playback: PlaybackConfig,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout(playback: PlaybackConfig) -> Self {
        Self::new(std::io::stdout(), playback)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, playback: PlaybackConfig) -> Self {
        Self { out, playback }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_log(&mut self, entries: &[DisplayEntry]) -> std::io::Result<()> {
        writeln!(self.out, "──────── conversation ────────")?;
        for entry in entries {
            match entry.speaker {
                Speaker::User => writeln!(self.out, "[{}] you: {}", entry.clock(), entry.text)?,
                Speaker::Bot => {
                    writeln!(self.out, "        [{}] bot: {}", entry.clock(), entry.text)?
                }
            }
        }
        self.out.flush()
    }
}

#[async_trait]
impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn render(&mut self, entries: &[DisplayEntry]) {
        if let Err(e) = self.write_log(entries) {
            log::warn!("display: failed to render conversation: {e}");
        }
    }

    async fn play(&mut self, audio: SynthesizedAudio) -> Result<(), PlaybackError> {
        match self.playback.command.clone() {
            Some(command) => {
                play_with_command(&command, &self.playback.args, audio).await?;
                Ok(())
            }
            None => {
                log::debug!(
                    "display: playback disabled, discarding {} bytes",
                    audio.bytes.len()
                );
                Ok(())
            }
        }
    }

    fn report_error(&mut self, error: &PipelineError) {
        let result = writeln!(
            self.out,
            "        [{}] error: {error}",
            error.stage().label()
        )
        .and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("display: failed to report error: {e}");
        }
    }
}

/// Write `audio` to a scratch file and run `command args… <file>` on it.
///
/// Returns the scratch path, which no longer exists when this returns.
pub async fn play_with_command(
    command: &str,
    args: &[String],
    audio: SynthesizedAudio,
) -> Result<PathBuf, PlaybackError> {
    let mut scratch = tempfile::Builder::new()
        .prefix("voice-assistant-")
        .suffix(audio.format.extension())
        .tempfile()?;
    scratch.write_all(&audio.bytes)?;
    scratch.flush()?;
    drop(audio);

    let path = scratch.path().to_path_buf();
    log::debug!("display: playing {} with `{command}`", path.display());

    let status = tokio::process::Command::new(command)
        .args(args)
        .arg(&path)
        .status()
        .await?;

    // Removes the scratch file.
    drop(scratch);

    if !status.success() {
        return Err(PlaybackError::PlayerFailed {
            command: command.to_string(),
            status: status.to_string(),
        });
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
