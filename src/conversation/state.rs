//! The authoritative session record.
//!
//! [`ConversationState`] holds the display log, the model history and the
//! one-shot reset flag.  Only the pipeline controller and [`reset`] write to
//! it; everything else reads through the accessors.
//!
//! [`reset`]: ConversationState::reset

use crate::config::ResponderConfig;
use crate::llm::ModelId;

use super::message::{ChatMessage, DisplayEntry, Role, Speaker};

/// Log lengths captured before a turn starts, used to undo a partial turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TurnCheckpoint {
    display_len: usize,
    history_len: usize,
}

/// One session's conversation.
///
/// `model_history()[0]` is always the system instruction.
///
/// ```
/// use voice_assistant::conversation::{ConversationState, Role};
/// use voice_assistant::llm::ModelId;
///
/// let mut state = ConversationState::new("Be brief.", ModelId::Gpt35Turbo);
/// assert_eq!(state.model_history().len(), 1);
/// assert_eq!(state.model_history()[0].role, Role::System);
///
/// state.reset();
/// assert!(state.is_reset_pending());
/// assert_eq!(state.model_history()[0].role, Role::System);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    display_log: Vec<DisplayEntry>,
    model_history: Vec<ChatMessage>,
    reset_pending: bool,
    selected_model: ModelId,
    system_prompt: String,
}

impl ConversationState {
    /// Fresh session: empty display log, history holding only the system
    /// instruction.
    pub fn new(system_prompt: impl Into<String>, selected_model: ModelId) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            display_log: Vec::new(),
            model_history: vec![ChatMessage::system(system_prompt.clone())],
            reset_pending: false,
            selected_model,
            system_prompt,
        }
    }

    pub fn from_config(config: &ResponderConfig) -> Self {
        Self::new(config.system_prompt.clone(), config.model)
    }

    pub fn display_log(&self) -> &[DisplayEntry] {
        &self.display_log
    }

    pub fn model_history(&self) -> &[ChatMessage] {
        &self.model_history
    }

    pub fn selected_model(&self) -> ModelId {
        self.selected_model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// `true` between [`reset`](Self::reset) and the next pipeline evaluation.
    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Number of completed question/reply pairs.
    pub fn turn_count(&self) -> usize {
        self.model_history
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }

    /// Start over: clear the display log, reseed the history with the system
    /// instruction and arm the one-shot suppression flag.
    pub fn reset(&mut self) {
        self.display_log.clear();
        self.model_history.clear();
        self.model_history
            .push(ChatMessage::system(self.system_prompt.clone()));
        self.reset_pending = true;
        log::info!("conversation: reset (next evaluation is suppressed)");
    }

    // -----------------------------------------------------------------------
    // Pipeline-only mutators
    // -----------------------------------------------------------------------

    /// Consume the reset flag, returning whether it was set.
    pub(crate) fn take_reset_flag(&mut self) -> bool {
        std::mem::replace(&mut self.reset_pending, false)
    }

    pub(crate) fn checkpoint(&self) -> TurnCheckpoint {
        TurnCheckpoint {
            display_len: self.display_log.len(),
            history_len: self.model_history.len(),
        }
    }

    /// Drop everything appended after `checkpoint`.  The system entry is
    /// never removed.
    pub(crate) fn rollback(&mut self, checkpoint: TurnCheckpoint) {
        self.display_log.truncate(checkpoint.display_len);
        self.model_history.truncate(checkpoint.history_len.max(1));
    }

    pub(crate) fn push_question(&mut self, text: &str) {
        self.display_log.push(DisplayEntry::now(Speaker::User, text));
        self.model_history.push(ChatMessage::user(text));
    }

    pub(crate) fn push_reply(&mut self, text: &str) {
        self.model_history.push(ChatMessage::assistant(text));
        self.display_log.push(DisplayEntry::now(Speaker::Bot, text));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConversationState {
        ConversationState::new("system prompt", ModelId::Gpt35Turbo)
    }

    #[test]
    fn new_state_has_only_system_entry() {
        let st = state();
        assert!(st.display_log().is_empty());
        assert_eq!(st.model_history(), &[ChatMessage::system("system prompt")]);
        assert!(!st.is_reset_pending());
        assert_eq!(st.turn_count(), 0);
    }

    #[test]
    fn question_and_reply_grow_both_logs() {
        let mut st = state();
        st.push_question("q");
        st.push_reply("a");

        assert_eq!(st.display_log().len(), 2);
        assert_eq!(st.display_log()[0].speaker, Speaker::User);
        assert_eq!(st.display_log()[1].speaker, Speaker::Bot);
        assert_eq!(
            &st.model_history()[1..],
            &[ChatMessage::user("q"), ChatMessage::assistant("a")]
        );
        assert_eq!(st.turn_count(), 1);
    }

    #[test]
    fn reset_reseeds_history_and_arms_flag() {
        let mut st = state();
        st.push_question("q");
        st.push_reply("a");

        st.reset();

        assert!(st.display_log().is_empty());
        assert_eq!(st.model_history(), &[ChatMessage::system("system prompt")]);
        assert!(st.is_reset_pending());
    }

    #[test]
    fn reset_flag_is_one_shot() {
        let mut st = state();
        st.reset();
        assert!(st.take_reset_flag());
        assert!(!st.take_reset_flag());
        assert!(!st.is_reset_pending());
    }

    #[test]
    fn rollback_removes_partial_turn() {
        let mut st = state();
        st.push_question("q1");
        st.push_reply("a1");
        let cp = st.checkpoint();

        st.push_question("q2");
        st.rollback(cp);

        assert_eq!(st.display_log().len(), 2);
        assert_eq!(st.model_history().len(), 3);
        assert_eq!(st.model_history().last(), Some(&ChatMessage::assistant("a1")));
    }

    #[test]
    fn rollback_keeps_system_entry() {
        let mut st = state();
        st.rollback(TurnCheckpoint {
            display_len: 0,
            history_len: 0,
        });
        assert_eq!(st.model_history()[0].role, Role::System);
    }

    #[test]
    fn from_config_uses_configured_model_and_prompt() {
        let config = ResponderConfig {
            model: ModelId::Gpt4,
            temperature: 0.2,
            system_prompt: "custom".into(),
        };
        let st = ConversationState::from_config(&config);
        assert_eq!(st.selected_model(), ModelId::Gpt4);
        assert_eq!(st.system_prompt(), "custom");
        assert_eq!(st.model_history()[0].content, "custom");
    }
}
