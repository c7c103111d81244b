//! Session record for one voice conversation.
//!
//! [`ConversationState`] keeps two logs that grow in lockstep: the display
//! log (`user`/`bot` lines with timestamps) and the model history
//! (`system`/`user`/`assistant` messages sent to the chat backend).

pub mod message;
pub mod state;

pub use message::{ChatMessage, DisplayEntry, Role, Speaker};
pub use state::ConversationState;
