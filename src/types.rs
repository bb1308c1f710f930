//! Core types for the coaching pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: stored session records, the normalized session summary, and the
//! generated coaching artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder substituted when a session produced no usable transcript
pub const NO_TRANSCRIPT_PLACEHOLDER: &str = "No transcript available";

/// A detected pause interval within a step recording
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PauseInterval {
    /// Pause length (seconds)
    #[serde(default)]
    pub len: f64,
}

/// Per-step speech metrics attached by the analysis pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Silence intervals detected during the step
    #[serde(default)]
    pub pauses: Vec<PauseInterval>,
    /// Detected filler tokens ("um", "uh", ...)
    #[serde(default)]
    pub fillers: Vec<String>,
    /// Step recording length (seconds)
    #[serde(default)]
    pub duration_sec: f64,
}

/// One prompted step of a recorded practice session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepRecord {
    /// What the user said during this step
    #[serde(default)]
    pub transcript: String,
    /// Speech metrics for this step, absent when analysis produced none
    #[serde(default)]
    pub metrics: Option<StepMetrics>,
}

/// Session-level averages precomputed by the analysis pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Average words per minute across the session
    #[serde(default)]
    pub wpm_avg: f64,
    /// Filler tokens per minute across the session
    #[serde(default)]
    pub fillers_per_min: f64,
    /// Fraction of session time with gaze on the camera/listener, in [0,1].
    /// Absent when the session carried no gaze signal (distinct from 0).
    #[serde(default)]
    pub eye_contact_ratio: Option<f64>,
    /// Overall session score
    #[serde(default)]
    pub score: f64,
}

/// A recorded practice session as stored by the session store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Store identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Difficulty level the session was played at (1-based)
    #[serde(default)]
    pub level: u8,
    /// When the session was recorded
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    /// Precomputed session-level averages
    #[serde(default)]
    pub aggregate: AggregateMetrics,
    /// Ordered per-step records
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

/// Flat validated metrics summary derived from a session record.
///
/// Immutable once built; every generation stage operates on this view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Average words per minute
    pub wpm_avg: f64,
    /// Filler tokens per minute
    pub fillers_per_min: f64,
    /// Filler occurrences summed across steps
    pub total_fillers: u32,
    /// Pauses counted across steps
    pub pause_count: u32,
    /// Mean pause length (seconds); 0 when no pauses were detected
    pub avg_pause_duration: f64,
    /// Eye contact fraction in [0,1]; `None` means not measured
    pub eye_contact_ratio: Option<f64>,
    /// Overall session score
    pub overall_score: f64,
    /// Space-joined step transcripts, or the placeholder when empty
    pub transcript: String,
    /// Total recording length (seconds, rounded)
    pub duration_sec: u32,
    /// Title of the practiced scenario, when known
    pub scenario_title: Option<String>,
    /// Difficulty level the session was played at (1-based)
    pub level: u8,
}

impl SessionSummary {
    /// Whether the transcript carries real speech rather than the placeholder
    pub fn has_transcript(&self) -> bool {
        !self.transcript.is_empty() && self.transcript != NO_TRANSCRIPT_PLACEHOLDER
    }

    /// Scenario title with the generic default applied
    pub fn scenario_or_default(&self) -> &str {
        self.scenario_title.as_deref().unwrap_or("Practice")
    }
}

/// Card classification shared by the generator and fallback paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Tip,
    Praise,
    Warning,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Tip => "tip",
            CardKind::Praise => "praise",
            CardKind::Warning => "warning",
        }
    }
}

/// A single actionable feedback card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCard {
    /// Short specific title (3-5 words)
    pub title: String,
    /// 2-3 sentences of specific, actionable feedback
    pub body: String,
    /// Card classification
    #[serde(rename = "type")]
    pub kind: CardKind,
}

/// Narrative encouragement note written in the persona's voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeNote {
    pub title: String,
    /// Paragraphs separated by blank lines
    pub body: String,
}

/// A follow-up question for the next difficulty level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    /// Position in the question sequence, starting at 1
    pub order: u32,
    /// Self-contained, second-person question text
    pub text: String,
    /// Deterministic media reference slug, not a resolved media lookup
    #[serde(rename = "videoUrl")]
    pub media_ref: String,
}

/// Target difficulty level for follow-up question generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLevel {
    Two,
    Three,
}

impl TargetLevel {
    /// Exact number of questions this level requires
    pub fn question_count(&self) -> usize {
        match self {
            TargetLevel::Two => 3,
            TargetLevel::Three => 2,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            TargetLevel::Two => 2,
            TargetLevel::Three => 3,
        }
    }
}

impl TryFrom<u8> for TargetLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(TargetLevel::Two),
            3 => Ok(TargetLevel::Three),
            other => Err(other),
        }
    }
}
