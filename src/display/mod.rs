//! Display sinks — where a finished turn becomes visible and audible.
//!
//! The pipeline hands a [`DisplaySink`] the whole display log after every
//! completed turn, then the synthesized reply for one-shot playback.  When a
//! turn fails, the sink is told instead of receiving a reply.

pub mod terminal;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::DisplayEntry;
use crate::pipeline::PipelineError;
use crate::tts::SynthesizedAudio;

pub use terminal::{play_with_command, TerminalSink};

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Failure to play synthesized audio.  Never fatal to a turn.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Writing the scratch file or launching the player failed.
    #[error("playback I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The player ran but reported failure.
    #[error("player `{command}` exited with {status}")]
    PlayerFailed { command: String, status: String },
}

// ---------------------------------------------------------------------------
// DisplaySink trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DisplaySink: Send {
    /// Show the complete log, oldest entry first.
    fn render(&mut self, entries: &[DisplayEntry]);

    /// Play `audio` once.  The bytes are not retained afterwards.
    async fn play(&mut self, audio: SynthesizedAudio) -> Result<(), PlaybackError>;

    /// Show `error` where the reply would have appeared.
    fn report_error(&mut self, error: &PipelineError);
}

// ---------------------------------------------------------------------------
// RecordingSink  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorded {
    /// Each render call as `(speaker, text)` pairs.
    pub renders: Vec<Vec<(crate::conversation::Speaker, String)>>,
    pub played: Vec<SynthesizedAudio>,
    pub errors: Vec<String>,
}

/// Sink that records everything it is given.  Clones share the record.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: std::sync::Arc<std::sync::Mutex<Recorded>>,
    fail_playback: bool,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `play` always fails.
    pub fn failing_playback() -> Self {
        Self {
            fail_playback: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap()
    }
}

#[cfg(test)]
#[async_trait]
impl DisplaySink for RecordingSink {
    fn render(&mut self, entries: &[DisplayEntry]) {
        let snapshot = entries.iter().map(|e| (e.speaker, e.text.clone())).collect();
        self.inner.lock().unwrap().renders.push(snapshot);
    }

    async fn play(&mut self, audio: SynthesizedAudio) -> Result<(), PlaybackError> {
        if self.fail_playback {
            return Err(PlaybackError::PlayerFailed {
                command: "test-player".into(),
                status: "exit status: 1".into(),
            });
        }
        self.inner.lock().unwrap().played.push(audio);
        Ok(())
    }

    fn report_error(&mut self, error: &PipelineError) {
        self.inner.lock().unwrap().errors.push(error.to_string());
    }
}
