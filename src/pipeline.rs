//! Generation orchestration
//!
//! This module provides the public API for artifact generation. Each
//! operation sequences prompt construction → completion call → response
//! extraction, and substitutes the deterministic fallback whenever the
//! primary path fails with a recoverable error. A `Configuration` error from
//! the client propagates unmodified: a misconfigured deployment fails loud
//! rather than silently degrading to all-fallback output.

use uuid::Uuid;

use crate::client::{CompletionProvider, GenerationClient, GenerationConfig};
use crate::error::CoachError;
use crate::extract;
use crate::fallback;
use crate::normalizer::SessionNormalizer;
use crate::prompt;
use crate::types::{
    FeedbackCard, FollowUpQuestion, NarrativeNote, SessionRecord, SessionSummary, TargetLevel,
};

/// Orchestrates artifact generation for practice sessions.
///
/// Stateless between calls; every invocation is an independent unit of work,
/// so one engine may serve concurrent requests without coordination.
pub struct CoachEngine {
    provider: Box<dyn CompletionProvider>,
    instance_id: String,
}

impl CoachEngine {
    /// Engine backed by the HTTP generation client
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_provider(Box::new(GenerationClient::new(config)))
    }

    /// Engine backed by an arbitrary completion provider (tests, shims)
    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Normalize a stored session record into a metrics summary
    pub fn normalize_session(
        &self,
        session: &SessionRecord,
        scenario_title: Option<&str>,
    ) -> SessionSummary {
        SessionNormalizer::normalize(session, scenario_title)
    }

    /// Generate 1-5 feedback cards for a session summary.
    ///
    /// Never fails for generator reasons; only a missing credential
    /// surfaces, as `CoachError::Configuration`.
    pub fn generate_feedback_cards(
        &self,
        summary: &SessionSummary,
    ) -> Result<Vec<FeedbackCard>, CoachError> {
        let prompt_text = prompt::feedback_cards_prompt(summary);
        self.run_stage("feedback_cards", &prompt_text, extract::extract_feedback_cards, || {
            fallback::fallback_feedback_cards(summary)
        })
    }

    /// Generate the persona's narrative note for a session summary
    pub fn generate_narrative_note(
        &self,
        summary: &SessionSummary,
    ) -> Result<NarrativeNote, CoachError> {
        let prompt_text = prompt::narrative_note_prompt(summary);
        self.run_stage("narrative_note", &prompt_text, extract::extract_narrative_note, || {
            fallback::fallback_narrative_note(summary)
        })
    }

    /// Generate follow-up questions for the next difficulty level.
    ///
    /// Exactly 3 questions for level 2 and 2 for level 3, unless the
    /// generator soft-degrades with fewer (the fallback table never does).
    pub fn generate_follow_up_questions(
        &self,
        summary: &SessionSummary,
        target: TargetLevel,
    ) -> Result<Vec<FollowUpQuestion>, CoachError> {
        let prompt_text = prompt::next_level_questions_prompt(summary, target);
        self.run_stage(
            "follow_up_questions",
            &prompt_text,
            |raw| extract::extract_questions(raw, target),
            || fallback::fallback_questions(summary.scenario_title.as_deref(), target),
        )
    }

    /// Shared prompt → complete → extract sequence with fallback dispatch.
    ///
    /// Recoverable errors are absorbed here and never observed by callers;
    /// the fallback closure must be infallible.
    fn run_stage<T>(
        &self,
        stage: &str,
        prompt_text: &str,
        extract: impl FnOnce(&str) -> Result<T, CoachError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, CoachError> {
        let request_id = Uuid::new_v4();
        log::info!(
            "engine {} request {request_id}: generating {stage}",
            self.instance_id
        );

        let primary = self
            .provider
            .complete(prompt_text)
            .and_then(|raw| extract(&raw));

        match primary {
            Ok(artifact) => {
                log::info!("request {request_id}: {stage} generated via completion provider");
                Ok(artifact)
            }
            Err(err) if err.is_recoverable() => {
                log::warn!(
                    "request {request_id}: {stage} generation failed ({err}); using metric-rule fallback"
                );
                Ok(fallback())
            }
            Err(err) => {
                log::error!("request {request_id}: {stage} generation aborted: {err}");
                Err(err)
            }
        }
    }
}
