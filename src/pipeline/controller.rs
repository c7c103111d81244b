//! Pipeline controller — drives one conversational turn per captured clip.
//!
//! # Turn flow
//!
//! ```text
//! evaluate(clip, state)
//!   ├─ reset pending      → clear flag, consume clip id      [ResetCleared]
//!   ├─ clip duration == 0 → nothing captured                 [Idle]
//!   ├─ clip id already seen                                  [AlreadyProcessed]
//!   └─ consume clip id
//!        └─▶ transcriber.transcribe(clip)                    [Transcribing]
//!              └─▶ append (user, question)
//!                    └─▶ responder.respond(history, model)   [Responding]
//!                          ├─ Err → roll back user entries, report
//!                          └─ Ok  → append (assistant, reply)
//!                                └─▶ sink.render(log)        [Rendering]
//!                                      └─▶ synthesize(reply) [Synthesizing]
//!                                            └─▶ sink.play   [Playing]
//! ```
//!
//! Each backend call is awaited before the next one starts.  `evaluate`
//! borrows the controller and the state mutably, so a second turn cannot
//! start while one is in flight.

use std::sync::Arc;

use thiserror::Error;

use crate::audio::{CapturedClip, ClipId};
use crate::conversation::ConversationState;
use crate::display::DisplaySink;
use crate::llm::{Responder, ResponderError};
use crate::stt::{Transcriber, TranscriptionError};
use crate::tts::{SynthesisError, Synthesizer};

use super::state::PipelineStage;

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// A turn that failed part-way.  Carries the clip and the failing stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transcription failed for clip {clip}: {source}")]
    Transcription {
        clip: ClipId,
        #[source]
        source: TranscriptionError,
    },

    #[error("no reply for clip {clip}: {source}")]
    Responder {
        clip: ClipId,
        #[source]
        source: ResponderError,
    },

    #[error("speech synthesis failed for clip {clip}: {source}")]
    Synthesis {
        clip: ClipId,
        #[source]
        source: SynthesisError,
    },
}

impl PipelineError {
    /// Stage the turn was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Transcription { .. } => PipelineStage::Transcribing,
            PipelineError::Responder { .. } => PipelineStage::Responding,
            PipelineError::Synthesis { .. } => PipelineStage::Synthesizing,
        }
    }

    pub fn clip(&self) -> ClipId {
        match self {
            PipelineError::Transcription { clip, .. }
            | PipelineError::Responder { clip, .. }
            | PipelineError::Synthesis { clip, .. } => *clip,
        }
    }
}

// ---------------------------------------------------------------------------
// TurnOutcome
// ---------------------------------------------------------------------------

/// What a call to [`PipelineController::evaluate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A reset was pending; the flag was cleared and nothing else happened.
    ResetCleared,
    /// The clip was empty.
    Idle,
    /// The clip id was not newer than the last consumed one.
    AlreadyProcessed,
    /// A full question/reply exchange was appended.
    Completed { question: String, reply: String },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

// ---------------------------------------------------------------------------
// PipelineController
// ---------------------------------------------------------------------------

/// Drives the conversation pipeline for one session.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use voice_assistant::audio::{CapturedClip, ClipSequence};
/// use voice_assistant::config::AppConfig;
/// use voice_assistant::conversation::ConversationState;
/// use voice_assistant::display::TerminalSink;
/// use voice_assistant::llm::ChatCompletionsResponder;
/// use voice_assistant::pipeline::PipelineController;
/// use voice_assistant::stt::WhisperTranscriber;
/// use voice_assistant::tts::GoogleTranslateSynthesizer;
///
/// # async fn example() {
/// let config = AppConfig::default().with_env_api_key();
/// let mut controller = PipelineController::new(
///     Arc::new(WhisperTranscriber::from_config(&config.api, &config.transcriber)),
///     Arc::new(ChatCompletionsResponder::from_config(&config.api, &config.responder)),
///     Arc::new(GoogleTranslateSynthesizer::from_config(&config.api, &config.synthesizer)),
///     Box::new(TerminalSink::stdout(config.playback.clone())),
///     config.synthesizer.language.clone(),
/// );
/// let mut state = ConversationState::from_config(&config.responder);
///
/// let mut seq = ClipSequence::new();
/// let clip = CapturedClip::from_wav(seq.next_id(), std::fs::read("q.wav").unwrap()).unwrap();
/// let outcome = controller.evaluate(&clip, &mut state).await;
/// # }
/// ```
pub struct PipelineController {
    transcriber: Arc<dyn Transcriber>,
    responder: Arc<dyn Responder>,
    synthesizer: Arc<dyn Synthesizer>,
    sink: Box<dyn DisplaySink>,
    language: String,
    last_consumed: Option<ClipId>,
    stage: PipelineStage,
}

impl PipelineController {
    /// Create a controller.
    ///
    /// * `language` — spoken language code passed to the synthesizer.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        responder: Arc<dyn Responder>,
        synthesizer: Arc<dyn Synthesizer>,
        sink: Box<dyn DisplaySink>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            transcriber,
            responder,
            synthesizer,
            sink,
            language: language.into(),
            last_consumed: None,
            stage: PipelineStage::Idle,
        }
    }

    /// Newest clip id this controller has consumed.
    pub fn last_consumed(&self) -> Option<ClipId> {
        self.last_consumed
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn sink_mut(&mut self) -> &mut dyn DisplaySink {
        self.sink.as_mut()
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Evaluate the latest captured clip against `state`.
    ///
    /// Re-evaluating a clip whose id was already consumed is a no-op, so the
    /// caller may hand the same clip back as often as it likes.
    ///
    /// # Errors
    ///
    /// Returns the [`PipelineError`] of a failed turn after reporting it to
    /// the sink.  A failed responder call leaves `state` exactly as it was
    /// before the turn; a failed synthesis leaves the completed exchange in
    /// place.
    pub async fn evaluate(
        &mut self,
        clip: &CapturedClip,
        state: &mut ConversationState,
    ) -> Result<TurnOutcome, PipelineError> {
        if state.take_reset_flag() {
            log::debug!("pipeline: reset pending, suppressing clip {}", clip.id());
            self.consume(clip.id());
            return Ok(TurnOutcome::ResetCleared);
        }

        if clip.is_empty() {
            return Ok(TurnOutcome::Idle);
        }

        if self.is_consumed(clip.id()) {
            log::debug!("pipeline: clip {} already processed", clip.id());
            return Ok(TurnOutcome::AlreadyProcessed);
        }
        self.consume(clip.id());

        let result = self.run_turn(clip, state).await;
        self.stage = PipelineStage::Idle;

        result.map_err(|e| {
            log::error!("pipeline error ({}): {e}", e.stage().label());
            self.sink.report_error(&e);
            e
        })
    }

    async fn run_turn(
        &mut self,
        clip: &CapturedClip,
        state: &mut ConversationState,
    ) -> Result<TurnOutcome, PipelineError> {
        let id = clip.id();

        // ── 1. Transcribe ────────────────────────────────────────────────
        self.enter(PipelineStage::Transcribing);
        let question = self
            .transcriber
            .transcribe(clip)
            .await
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(TranscriptionError::NoSpeech)
                } else {
                    Ok(text)
                }
            })
            .map_err(|source| PipelineError::Transcription { clip: id, source })?;

        log::debug!("pipeline: question = {question:?}");

        // ── 2. Append question ───────────────────────────────────────────
        let checkpoint = state.checkpoint();
        state.push_question(&question);

        // ── 3. Ask for the reply ─────────────────────────────────────────
        self.enter(PipelineStage::Responding);
        let response = self
            .responder
            .respond(state.model_history(), state.selected_model())
            .await;
        let reply = match response {
            Ok(reply) => reply,
            Err(source) => {
                state.rollback(checkpoint);
                return Err(PipelineError::Responder { clip: id, source });
            }
        };

        log::debug!("pipeline: reply = {reply:?}");

        // ── 4. Append reply ──────────────────────────────────────────────
        state.push_reply(&reply);

        // ── 5. Render ────────────────────────────────────────────────────
        self.enter(PipelineStage::Rendering);
        self.sink.render(state.display_log());

        // ── 6. Synthesize and play ───────────────────────────────────────
        self.enter(PipelineStage::Synthesizing);
        let audio = self
            .synthesizer
            .synthesize(&reply, &self.language)
            .await
            .map_err(|source| PipelineError::Synthesis { clip: id, source })?;

        self.enter(PipelineStage::Playing);
        if let Err(e) = self.sink.play(audio).await {
            // Playback failure is non-fatal — the reply is already shown.
            log::warn!("pipeline: playback failed: {e}");
        }

        log::info!(
            "pipeline: clip {id} answered ({} turn(s) this session)",
            state.turn_count()
        );

        Ok(TurnOutcome::Completed { question, reply })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn is_consumed(&self, id: ClipId) -> bool {
        self.last_consumed.is_some_and(|last| id <= last)
    }

    fn consume(&mut self, id: ClipId) {
        self.last_consumed = Some(self.last_consumed.map_or(id, |last| last.max(id)));
    }

    fn enter(&mut self, stage: PipelineStage) {
        log::debug!("pipeline: → {}", stage.label());
        self.stage = stage;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::AudioFormat;
    use crate::conversation::{ChatMessage, Role, Speaker};
    use crate::display::RecordingSink;
    use crate::llm::{MockResponder, ModelId};
    use crate::stt::MockTranscriber;
    use crate::tts::MockSynthesizer;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    struct Harness {
        stt: Arc<MockTranscriber>,
        llm: Arc<MockResponder>,
        tts: Arc<MockSynthesizer>,
        sink: RecordingSink,
        controller: PipelineController,
        state: ConversationState,
    }

    fn harness_with(
        stt: MockTranscriber,
        llm: MockResponder,
        tts: MockSynthesizer,
        sink: RecordingSink,
    ) -> Harness {
        let stt = Arc::new(stt);
        let llm = Arc::new(llm);
        let tts = Arc::new(tts);
        let controller = PipelineController::new(
            stt.clone(),
            llm.clone(),
            tts.clone(),
            Box::new(sink.clone()),
            "ko",
        );
        Harness {
            stt,
            llm,
            tts,
            sink,
            controller,
            state: ConversationState::new("be brief", ModelId::Gpt4),
        }
    }

    fn harness() -> Harness {
        harness_with(
            MockTranscriber::ok("질문"),
            MockResponder::ok("답변"),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        )
    }

    fn clip(id: u64) -> CapturedClip {
        CapturedClip::new(
            ClipId::new(id),
            vec![0x52, 0x49, 0x46, 0x46],
            AudioFormat::Wav,
            Duration::from_secs(2),
        )
    }

    fn empty_clip(id: u64) -> CapturedClip {
        CapturedClip::new(ClipId::new(id), Vec::new(), AudioFormat::Wav, Duration::ZERO)
    }

    impl Harness {
        async fn eval(&mut self, clip: &CapturedClip) -> Result<TurnOutcome, PipelineError> {
            self.controller.evaluate(clip, &mut self.state).await
        }

        fn backend_calls(&self) -> (usize, usize, usize) {
            (self.stt.calls(), self.llm.calls(), self.tts.calls())
        }
    }

    // -----------------------------------------------------------------------
    // Successful turns
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn successful_turn_grows_both_logs_by_two() {
        let mut h = harness();

        let outcome = h.eval(&clip(1)).await.unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Completed {
                question: "질문".into(),
                reply: "답변".into()
            }
        );
        assert_eq!(h.state.display_log().len(), 2);
        assert_eq!(h.state.model_history().len(), 3);
        assert_eq!(
            &h.state.model_history()[1..],
            &[ChatMessage::user("질문"), ChatMessage::assistant("답변")]
        );
        assert_eq!(h.backend_calls(), (1, 1, 1));
        assert_eq!(h.controller.stage(), PipelineStage::Idle);
        assert_eq!(h.controller.last_consumed(), Some(ClipId::new(1)));
    }

    #[tokio::test]
    async fn each_turn_adds_exactly_two_entries() {
        let mut h = harness();
        for id in 1..=4u64 {
            let before = (h.state.display_log().len(), h.state.model_history().len());
            assert!(h.eval(&clip(id)).await.unwrap().is_completed());
            let after = (h.state.display_log().len(), h.state.model_history().len());
            assert_eq!(after, (before.0 + 2, before.1 + 2));
        }
    }

    #[tokio::test]
    async fn responder_sees_full_history_and_selected_model() {
        let mut h = harness();
        h.eval(&clip(1)).await.unwrap();

        let requests = h.llm.requests();
        assert_eq!(requests.len(), 1);
        let (history, model) = &requests[0];
        assert_eq!(*model, ModelId::Gpt4);
        assert_eq!(
            history,
            &vec![ChatMessage::system("be brief"), ChatMessage::user("질문")]
        );
    }

    #[tokio::test]
    async fn reply_is_rendered_then_synthesized_and_played() {
        let mut h = harness();
        h.eval(&clip(1)).await.unwrap();

        assert_eq!(h.tts.requests(), vec![("답변".to_string(), "ko".to_string())]);

        let rec = h.sink.recorded();
        assert_eq!(rec.renders.len(), 1);
        assert_eq!(
            rec.renders[0],
            vec![(Speaker::User, "질문".to_string()), (Speaker::Bot, "답변".to_string())]
        );
        assert_eq!(rec.played.len(), 1);
        assert_eq!(rec.played[0].bytes, "답변".as_bytes());
        assert!(rec.errors.is_empty());
    }

    #[tokio::test]
    async fn three_turns_alternate_in_call_order() {
        let mut h = harness_with(
            MockTranscriber::scripted(vec![Ok("q1".into()), Ok("q2".into()), Ok("q3".into())]),
            MockResponder::scripted(vec![Ok("a1".into()), Ok("a2".into()), Ok("a3".into())]),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );

        for id in 1..=3u64 {
            h.eval(&clip(id)).await.unwrap();
        }

        let shown: Vec<(Speaker, &str)> = h
            .state
            .display_log()
            .iter()
            .map(|e| (e.speaker, e.text.as_str()))
            .collect();
        assert_eq!(
            shown,
            vec![
                (Speaker::User, "q1"),
                (Speaker::Bot, "a1"),
                (Speaker::User, "q2"),
                (Speaker::Bot, "a2"),
                (Speaker::User, "q3"),
                (Speaker::Bot, "a3"),
            ]
        );

        // Each request carries the whole conversation so far, in order.
        let lens: Vec<usize> = h.llm.requests().iter().map(|(m, _)| m.len()).collect();
        assert_eq!(lens, vec![2, 4, 6]);
        let requests = h.llm.requests();
        let roles: Vec<Role> = requests[2].0.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );

        let spoken: Vec<String> = h.tts.requests().into_iter().map(|(t, _)| t).collect();
        assert_eq!(spoken, vec!["a1", "a2", "a3"]);

        // Timestamps never go backwards.
        let log = h.state.display_log();
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    // -----------------------------------------------------------------------
    // No-op evaluations
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_clip_touches_nothing() {
        let mut h = harness();
        let before = h.state.clone();

        assert_eq!(h.eval(&empty_clip(1)).await.unwrap(), TurnOutcome::Idle);

        assert_eq!(h.state, before);
        assert_eq!(h.backend_calls(), (0, 0, 0));
        assert!(h.sink.recorded().renders.is_empty());
    }

    #[tokio::test]
    async fn same_clip_twice_is_a_no_op() {
        let mut h = harness();
        let c = clip(1);

        h.eval(&c).await.unwrap();
        let after_first = h.state.clone();

        assert_eq!(h.eval(&c).await.unwrap(), TurnOutcome::AlreadyProcessed);
        assert_eq!(h.state, after_first);
        assert_eq!(h.backend_calls(), (1, 1, 1));
    }

    #[tokio::test]
    async fn older_clip_id_is_a_no_op() {
        let mut h = harness();
        h.eval(&clip(5)).await.unwrap();

        assert_eq!(h.eval(&clip(3)).await.unwrap(), TurnOutcome::AlreadyProcessed);
        assert_eq!(h.backend_calls(), (1, 1, 1));
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn reset_suppresses_next_evaluation_then_new_clip_processes() {
        let mut h = harness();
        h.eval(&clip(1)).await.unwrap();

        h.state.reset();
        let baseline = h.state.clone();

        // Positive-duration clip right after reset: only clears the flag.
        assert_eq!(h.eval(&clip(2)).await.unwrap(), TurnOutcome::ResetCleared);
        assert!(!h.state.is_reset_pending());
        assert_eq!(h.state.display_log(), baseline.display_log());
        assert_eq!(h.state.model_history(), baseline.model_history());
        assert_eq!(h.backend_calls(), (1, 1, 1));

        // A new capture is processed normally.
        assert!(h.eval(&clip(3)).await.unwrap().is_completed());
        assert_eq!(h.state.display_log().len(), 2);
        assert_eq!(h.state.model_history().len(), 3);
        assert_eq!(h.backend_calls(), (2, 2, 2));
    }

    #[tokio::test]
    async fn clip_suppressed_by_reset_is_never_processed() {
        let mut h = harness();
        h.state.reset();

        let pending = clip(1);
        assert_eq!(h.eval(&pending).await.unwrap(), TurnOutcome::ResetCleared);
        assert_eq!(h.eval(&pending).await.unwrap(), TurnOutcome::AlreadyProcessed);
        assert_eq!(h.backend_calls(), (0, 0, 0));
    }

    #[tokio::test]
    async fn reset_suppression_is_one_shot() {
        let mut h = harness();
        h.state.reset();

        assert_eq!(h.eval(&empty_clip(1)).await.unwrap(), TurnOutcome::ResetCleared);
        assert!(h.eval(&clip(2)).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn system_entry_survives_turns_and_resets() {
        let mut h = harness();
        let mut id = 0;
        for _ in 0..3 {
            for _ in 0..2 {
                id += 1;
                h.eval(&clip(id)).await.unwrap();
                assert_eq!(h.state.model_history()[0], ChatMessage::system("be brief"));
            }
            h.state.reset();
            assert_eq!(h.state.model_history(), &[ChatMessage::system("be brief")]);
            id += 1;
            h.eval(&clip(id)).await.unwrap();
        }
        let systems = h
            .state
            .model_history()
            .iter()
            .filter(|m| m.role == Role::System)
            .count();
        assert_eq!(systems, 1);
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn responder_error_rolls_back_the_question() {
        let mut h = harness_with(
            MockTranscriber::ok("q"),
            MockResponder::scripted(vec![
                Ok("a1".into()),
                Err(ResponderError::QuotaExceeded("insufficient_quota".into())),
            ]),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );
        h.eval(&clip(1)).await.unwrap();
        let before = h.state.clone();

        let err = h.eval(&clip(2)).await.unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Responding);
        assert_eq!(err.clip(), ClipId::new(2));
        assert!(matches!(
            err,
            PipelineError::Responder {
                source: ResponderError::QuotaExceeded(_),
                ..
            }
        ));

        // No bot entry for the failed turn and no orphaned user entry.
        assert_eq!(h.state, before);
        assert_eq!(h.state.display_log().last().map(|e| e.speaker), Some(Speaker::Bot));
        assert_eq!(h.tts.calls(), 1);

        let rec = h.sink.recorded();
        assert_eq!(rec.errors.len(), 1);
        assert!(rec.errors[0].contains("quota"));
        assert_eq!(rec.renders.len(), 1);
    }

    #[tokio::test]
    async fn transcription_error_leaves_state_untouched() {
        let mut h = harness_with(
            MockTranscriber::err(TranscriptionError::Unauthorized("bad key".into())),
            MockResponder::ok("never"),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );
        let before = h.state.clone();

        let err = h.eval(&clip(1)).await.unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Transcribing);
        assert_eq!(h.state, before);
        assert_eq!(h.backend_calls(), (1, 0, 0));
        assert_eq!(h.sink.recorded().errors.len(), 1);
    }

    #[tokio::test]
    async fn failed_clip_is_not_retried_automatically() {
        let mut h = harness_with(
            MockTranscriber::scripted(vec![
                Err(TranscriptionError::Timeout),
                Ok("second try".into()),
            ]),
            MockResponder::ok("a"),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );
        let c = clip(1);

        assert!(h.eval(&c).await.is_err());
        assert_eq!(h.eval(&c).await.unwrap(), TurnOutcome::AlreadyProcessed);
        assert_eq!(h.stt.calls(), 1);

        assert!(h.eval(&clip(2)).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn blank_transcript_is_no_speech() {
        let mut h = harness_with(
            MockTranscriber::ok("   "),
            MockResponder::ok("a"),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );

        let err = h.eval(&clip(1)).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Transcription {
                source: TranscriptionError::NoSpeech,
                ..
            }
        ));
        assert!(h.state.display_log().is_empty());
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn synthesis_error_keeps_the_completed_exchange() {
        let mut h = harness_with(
            MockTranscriber::ok("q"),
            MockResponder::ok("a"),
            MockSynthesizer::err(SynthesisError::UnsupportedLanguage("ko".into())),
            RecordingSink::new(),
        );

        let err = h.eval(&clip(1)).await.unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Synthesizing);
        assert_eq!(h.state.display_log().len(), 2);
        assert_eq!(h.state.model_history().len(), 3);

        let rec = h.sink.recorded();
        assert_eq!(rec.renders.len(), 1);
        assert!(rec.played.is_empty());
        assert_eq!(rec.errors.len(), 1);
    }

    #[tokio::test]
    async fn playback_failure_is_not_fatal() {
        let mut h = harness_with(
            MockTranscriber::ok("q"),
            MockResponder::ok("a"),
            MockSynthesizer::ok(),
            RecordingSink::failing_playback(),
        );

        assert!(h.eval(&clip(1)).await.unwrap().is_completed());
        assert!(h.sink.recorded().errors.is_empty());
    }

    #[tokio::test]
    async fn session_continues_after_a_failure() {
        let mut h = harness_with(
            MockTranscriber::ok("q"),
            MockResponder::scripted(vec![
                Err(ResponderError::Timeout),
                Ok("a".into()),
            ]),
            MockSynthesizer::ok(),
            RecordingSink::new(),
        );

        assert!(h.eval(&clip(1)).await.is_err());
        assert!(h.eval(&clip(2)).await.unwrap().is_completed());
        assert_eq!(h.state.display_log().len(), 2);
        assert_eq!(h.state.turn_count(), 1);
    }
}
