//! TTS (Text-to-Speech) module.
//!
//! * [`Synthesizer`] — async trait implemented by all speech backends.
//! * [`GoogleTranslateSynthesizer`] — `translate_tts` backend, MP3 output.
//! * [`SynthesizedAudio`] — bytes plus container format, consumed by playback.

pub mod google;
pub mod synthesizer;

pub use google::{is_supported_language, split_text, GoogleTranslateSynthesizer, MAX_CHUNK_CHARS};
pub use synthesizer::{SynthesisError, SynthesizedAudio, Synthesizer};

#[cfg(test)]
pub use synthesizer::MockSynthesizer;
