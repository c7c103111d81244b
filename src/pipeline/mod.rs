//! Conversation pipeline for the voice assistant.
//!
//! This module sequences one turn: clip → transcript → history → reply →
//! render → speech → playback, and decides when a clip must *not* start a
//! turn (pending reset, empty clip, clip already consumed).
//!
//! # Architecture
//!
//! ```text
//! capture layer ──CapturedClip──▶ PipelineController::evaluate(clip, &mut state)
//!                                        │
//!                                        ├─ Transcriber  (async)
//!                                        ├─ Responder    (async)
//!                                        ├─ DisplaySink::render
//!                                        ├─ Synthesizer  (async)
//!                                        └─ DisplaySink::play
//!
//! ConversationState ←── owned by the caller, borrowed mutably per turn
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voice_assistant::audio::{CapturedClip, ClipSequence};
//! use voice_assistant::conversation::ConversationState;
//! use voice_assistant::display::DisplaySink;
//! use voice_assistant::llm::{ModelId, Responder};
//! use voice_assistant::pipeline::{PipelineController, TurnOutcome};
//! use voice_assistant::stt::Transcriber;
//! use voice_assistant::tts::Synthesizer;
//!
//! # fn make_stt() -> Arc<dyn Transcriber> { unimplemented!() }
//! # fn make_llm() -> Arc<dyn Responder> { unimplemented!() }
//! # fn make_tts() -> Arc<dyn Synthesizer> { unimplemented!() }
//! # fn make_sink() -> Box<dyn DisplaySink> { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     let mut controller =
//!         PipelineController::new(make_stt(), make_llm(), make_tts(), make_sink(), "ko");
//!     let mut state = ConversationState::new("Be brief.", ModelId::Gpt35Turbo);
//!
//!     let mut seq = ClipSequence::new();
//!     let clip = CapturedClip::from_wav(seq.next_id(), std::fs::read("q.wav").unwrap()).unwrap();
//!     match controller.evaluate(&clip, &mut state).await {
//!         Ok(TurnOutcome::Completed { reply, .. }) => println!("{reply}"),
//!         Ok(other) => println!("{other:?}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod controller;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{PipelineController, PipelineError, TurnOutcome};
pub use state::PipelineStage;
