//! Captured audio clips and their identities.
//!
//! A [`CapturedClip`] is what the capture layer hands to the pipeline: the
//! encoded bytes, the container format and the measured duration.  Each clip
//! carries a [`ClipId`] allocated by a [`ClipSequence`]; ids are strictly
//! increasing so the pipeline can tell a fresh capture from one it has
//! already consumed.

use std::fmt;
use std::io::Cursor;
use std::time::Duration;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ClipId / ClipSequence
// ---------------------------------------------------------------------------

/// Stable identity of one capture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipId(u64);

impl ClipId {
    /// Wrap a raw sequence number.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates strictly increasing [`ClipId`]s, starting at 1.
///
/// ```
/// use voice_assistant::audio::ClipSequence;
///
/// let mut seq = ClipSequence::new();
/// let a = seq.next_id();
/// let b = seq.next_id();
/// assert!(b > a);
/// ```
#[derive(Debug, Default)]
pub struct ClipSequence {
    last: u64,
}

impl ClipSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ClipId {
        self.last += 1;
        ClipId(self.last)
    }
}

// ---------------------------------------------------------------------------
// AudioFormat
// ---------------------------------------------------------------------------

/// Container format of the encoded clip bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// File name used when uploading the clip as a multipart part.
    pub fn file_name(self) -> &'static str {
        match self {
            AudioFormat::Wav => "input.wav",
            AudioFormat::Mp3 => "input.mp3",
        }
    }

    /// File extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => ".wav",
            AudioFormat::Mp3 => ".mp3",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }
}

// ---------------------------------------------------------------------------
// CapturedClip
// ---------------------------------------------------------------------------

/// Errors raised while turning raw bytes into a [`CapturedClip`].
#[derive(Debug, Error)]
pub enum ClipError {
    /// The bytes could not be parsed as a WAV stream.
    #[error("invalid WAV data: {0}")]
    InvalidWav(String),
}

impl From<hound::Error> for ClipError {
    fn from(e: hound::Error) -> Self {
        ClipError::InvalidWav(e.to_string())
    }
}

/// One finite captured clip.
#[derive(Debug, Clone)]
pub struct CapturedClip {
    id: ClipId,
    bytes: Vec<u8>,
    format: AudioFormat,
    duration: Duration,
}

impl CapturedClip {
    /// Build a clip whose duration was measured by the capture layer.
    pub fn new(id: ClipId, bytes: Vec<u8>, format: AudioFormat, duration: Duration) -> Self {
        Self {
            id,
            bytes,
            format,
            duration,
        }
    }

    /// Build a clip from a complete WAV file, reading the duration from its
    /// header (`frames / sample_rate`).
    ///
    /// # Errors
    ///
    /// [`ClipError::InvalidWav`] when the header cannot be parsed.
    pub fn from_wav(id: ClipId, bytes: Vec<u8>) -> Result<Self, ClipError> {
        let reader = hound::WavReader::new(Cursor::new(bytes.as_slice()))?;
        let spec = reader.spec();
        // `duration()` is the per-channel frame count.
        let frames = u64::from(reader.duration());
        let duration = if spec.sample_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(frames as f64 / f64::from(spec.sample_rate))
        };
        drop(reader);

        Ok(Self::new(id, bytes, AudioFormat::Wav, duration))
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// `true` when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.duration.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn wav_bytes(sample_rate: u32, frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}
