//! Turn-based voice assistant.
//!
//! A captured clip is transcribed, answered by a chat model with the whole
//! conversation as context, shown in the display log and spoken back.

pub mod audio;
pub mod config;
pub mod conversation;
pub mod display;
pub mod llm;
pub mod pipeline;
pub mod stt;
pub mod tts;
