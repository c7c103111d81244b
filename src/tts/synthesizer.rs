//! Core synthesizer trait, output type and error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioFormat;

// ---------------------------------------------------------------------------
// SynthesisError
// ---------------------------------------------------------------------------

/// Errors that can occur while synthesizing speech.
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    /// The backend cannot speak the requested language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Nothing to say.
    #[error("no text to synthesize")]
    EmptyText,

    /// Non-success HTTP status from the backend.
    #[error("synthesis backend returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("synthesis request timed out")]
    Timeout,
}

impl From<reqwest::Error> for SynthesisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SynthesisError::Timeout
        } else {
            SynthesisError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesizedAudio
// ---------------------------------------------------------------------------

/// Playable audio returned by a synthesizer.  Consumed by playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl SynthesizedAudio {
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            format: AudioFormat::Mp3,
        }
    }
}

// ---------------------------------------------------------------------------
// Synthesizer trait
// ---------------------------------------------------------------------------

/// Text-to-speech backend.
///
/// `language` is a BCP-47 / ISO-639-1 code such as `"ko"` or `"en"`.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str)
        -> Result<SynthesizedAudio, SynthesisError>;
}

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// Test double that echoes the text back as "audio" bytes, or fails.
#[cfg(test)]
pub struct MockSynthesizer {
    fail_with: Option<SynthesisError>,
    requests: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockSynthesizer {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            requests: Default::default(),
        }
    }

    pub fn err(error: SynthesisError) -> Self {
        Self {
            fail_with: Some(error),
            requests: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every `(text, language)` pair received, in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(SynthesizedAudio::mp3(text.as_bytes().to_vec())),
        }
    }
}
