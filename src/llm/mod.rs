//! Chat backend that turns the conversation history into the next reply.
//!
//! This module provides:
//! * [`Responder`] — async trait implemented by all chat backends.
//! * [`ChatCompletionsResponder`] — OpenAI-compatible REST backend.
//! * [`ModelId`] — the fixed set of selectable models.
//! * [`ResponderError`] — error variants for chat requests.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_assistant::config::AppConfig;
//! use voice_assistant::conversation::ChatMessage;
//! use voice_assistant::llm::{ChatCompletionsResponder, ModelId, Responder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default().with_env_api_key();
//!     let responder = ChatCompletionsResponder::from_config(&config.api, &config.responder);
//!
//!     let history = vec![
//!         ChatMessage::system("Answer in one sentence."),
//!         ChatMessage::user("What is Rust?"),
//!     ];
//!     let reply = responder.respond(&history, ModelId::Gpt35Turbo).await.unwrap();
//!     println!("{reply}");
//! }
//! ```

pub mod model;
pub mod responder;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use model::ModelId;
pub use responder::{ChatCompletionsResponder, Responder, ResponderError};

#[cfg(test)]
pub use responder::MockResponder;
