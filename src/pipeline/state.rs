//! Pipeline stages.
//!
//! [`PipelineStage`] tracks where the controller is inside a turn.  Errors
//! carry the stage they happened in so the display can say what went wrong.

/// Stages of one conversational turn.
///
/// ```text
/// Idle ──new clip──▶ Transcribing ──▶ Responding ──▶ Rendering
///                                       ──▶ Synthesizing ──▶ Playing ──▶ Idle
/// any stage ──error──▶ Idle (error returned to the caller)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    /// Waiting for a new clip.
    #[default]
    Idle,

    /// The clip is being turned into the question text.
    Transcribing,

    /// The chat backend is producing the reply.
    Responding,

    /// The display log is being handed to the sink.
    Rendering,

    /// The reply is being turned into speech.
    Synthesizing,

    /// The sink is playing the synthesized reply.
    Playing,
}

impl PipelineStage {
    /// Returns `true` while a turn is in flight.
    ///
    /// ```
    /// use voice_assistant::pipeline::PipelineStage;
    ///
    /// assert!(!PipelineStage::Idle.is_busy());
    /// assert!(PipelineStage::Transcribing.is_busy());
    /// assert!(PipelineStage::Playing.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        !matches!(self, PipelineStage::Idle)
    }

    /// A short human-readable label for status lines and error reports.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Transcribing => "transcribing",
            PipelineStage::Responding => "responding",
            PipelineStage::Rendering => "rendering",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::Playing => "playing",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
