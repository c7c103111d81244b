//! Core transcriber trait and error type.
//!
//! [`Transcriber`] is the interface used by the pipeline.  It is object-safe
//! and `Send + Sync` so it can be held behind an `Arc<dyn Transcriber>`.
//!
//! [`MockTranscriber`] (available under `#[cfg(test)]`) returns scripted
//! responses so the pipeline can be tested without a network.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::CapturedClip;

// ---------------------------------------------------------------------------
// TranscriptionError
// ---------------------------------------------------------------------------

/// All errors that can arise while transcribing a clip.
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    /// The clip holds no audio bytes.
    #[error("audio clip is empty")]
    EmptyAudio,

    /// The clip exceeds the backend's upload limit.
    #[error("audio clip too large: {size} bytes (maximum {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// The audio was decoded but contained no recognisable speech.
    #[error("no speech recognised in clip")]
    NoSpeech,

    /// The backend could not decode the audio.
    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    /// The credential was missing or rejected.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Any other non-success HTTP status.
    #[error("transcription backend returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("transcription request timed out")]
    Timeout,

    /// The response body was not the expected JSON.
    #[error("failed to parse transcription response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranscriptionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranscriptionError::Timeout
        } else {
            TranscriptionError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Speech-to-text backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `clip` and return the text transcript.
    async fn transcribe(&self, clip: &CapturedClip) -> Result<String, TranscriptionError>;
}

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns pre-configured responses in order.
#[cfg(test)]
pub struct MockTranscriber {
    script: std::sync::Mutex<std::collections::VecDeque<Result<String, TranscriptionError>>>,
    repeat: Option<String>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockTranscriber {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            script: Default::default(),
            repeat: Some(text.into()),
            calls: Default::default(),
        }
    }

    /// Return the scripted results in order; once exhausted every call fails
    /// with `EmptyAudio`.
    pub fn scripted(script: Vec<Result<String, TranscriptionError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(script.into()),
            repeat: None,
            calls: Default::default(),
        }
    }

    /// Create a mock whose first call returns `Err(error)`.
    pub fn err(error: TranscriptionError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, clip: &CapturedClip) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        // Enforce the empty-audio contract even in the mock.
        if clip.bytes().is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        match &self.repeat {
            Some(text) => Ok(text.clone()),
            None => Err(TranscriptionError::EmptyAudio),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::{AudioFormat, ClipId};

    fn clip(bytes: Vec<u8>) -> CapturedClip {
        CapturedClip::new(ClipId::new(1), bytes, AudioFormat::Wav, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn mock_ok_returns_configured_text() {
        let engine = MockTranscriber::ok("안녕하세요");
        assert_eq!(engine.transcribe(&clip(vec![1, 2, 3])).await.unwrap(), "안녕하세요");
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn mock_err_returns_configured_error() {
        let engine = MockTranscriber::err(TranscriptionError::InvalidAudio("boom".into()));
        let err = engine.transcribe(&clip(vec![1])).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidAudio(_)));
    }

    #[tokio::test]
    async fn mock_rejects_empty_bytes() {
        let engine = MockTranscriber::ok("text");
        let err = engine.transcribe(&clip(Vec::new())).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::EmptyAudio));
    }

    #[test]
    fn too_large_display_mentions_sizes() {
        let e = TranscriptionError::TooLarge { size: 30, max: 25 };
        let msg = e.to_string();
        assert!(msg.contains("30") && msg.contains("25"));
    }

    #[test]
    fn box_dyn_transcriber_compiles() {
        let _engine: Box<dyn Transcriber> = Box::new(MockTranscriber::ok("ok"));
    }
}
