//! STT (Speech-to-Text) module.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_assistant::audio::{CapturedClip, ClipSequence};
//! use voice_assistant::config::AppConfig;
//! use voice_assistant::stt::{Transcriber, WhisperTranscriber};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default().with_env_api_key();
//!     let stt = WhisperTranscriber::from_config(&config.api, &config.transcriber);
//!
//!     let mut seq = ClipSequence::new();
//!     let clip = CapturedClip::from_wav(seq.next_id(), std::fs::read("q.wav").unwrap()).unwrap();
//!     println!("{}", stt.transcribe(&clip).await.unwrap());
//! }
//! ```

pub mod transcriber;
pub mod whisper;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use transcriber::{Transcriber, TranscriptionError};
pub use whisper::{WhisperTranscriber, MAX_UPLOAD_BYTES};

#[cfg(test)]
pub use transcriber::MockTranscriber;
