//! Captured audio as seen by the conversation pipeline.
//!
//! Device capture itself lives outside this crate; whatever records the
//! user hands over a finished [`CapturedClip`] tagged with a [`ClipId`] from
//! a [`ClipSequence`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voice_assistant::audio::{CapturedClip, ClipSequence};
//!
//! let mut seq = ClipSequence::new();
//! let bytes = std::fs::read("question.wav").unwrap();
//! let clip = CapturedClip::from_wav(seq.next_id(), bytes).unwrap();
//! println!("{} lasts {:?}", clip.id(), clip.duration());
//! ```

pub mod clip;

pub use clip::{AudioFormat, CapturedClip, ClipError, ClipId, ClipSequence};
