//! Session metrics normalization
//!
//! This module collapses a stored session record into the flat summary the
//! generation stages operate on.
//! - Pause and filler totals recomputed from step records
//! - Transcript concatenation with placeholder substitution
//! - Absent eye contact preserved as absent

use crate::types::{SessionRecord, SessionSummary, StepRecord, NO_TRANSCRIPT_PLACEHOLDER};

/// Normalizer for collapsing session records into metric summaries
pub struct SessionNormalizer;

impl SessionNormalizer {
    /// Build a summary from a stored session record.
    ///
    /// Missing numeric fields default to 0; eye contact preserves absence.
    /// Pause and filler totals are recomputed from step records rather than
    /// read from the aggregate, so per-step and aggregate data cannot drift.
    pub fn normalize(session: &SessionRecord, scenario_title: Option<&str>) -> SessionSummary {
        let (pause_count, total_pause_duration) = sum_pauses(&session.steps);
        let avg_pause_duration = if pause_count > 0 {
            total_pause_duration / pause_count as f64
        } else {
            0.0
        };

        SessionSummary {
            wpm_avg: session.aggregate.wpm_avg,
            fillers_per_min: session.aggregate.fillers_per_min,
            total_fillers: count_fillers(&session.steps),
            pause_count,
            avg_pause_duration,
            eye_contact_ratio: session.aggregate.eye_contact_ratio,
            overall_score: session.aggregate.score,
            transcript: join_transcripts(&session.steps),
            duration_sec: total_duration_sec(&session.steps),
            scenario_title: scenario_title.map(str::to_string),
            level: session.level.max(1),
        }
    }
}

/// Count pauses and sum their lengths across all steps
fn sum_pauses(steps: &[StepRecord]) -> (u32, f64) {
    let mut count = 0u32;
    let mut total = 0.0f64;
    for step in steps {
        if let Some(metrics) = &step.metrics {
            for pause in &metrics.pauses {
                total += pause.len;
                count += 1;
            }
        }
    }
    (count, total)
}

/// Sum filler occurrences across all steps
fn count_fillers(steps: &[StepRecord]) -> u32 {
    steps
        .iter()
        .filter_map(|step| step.metrics.as_ref())
        .map(|metrics| metrics.fillers.len() as u32)
        .sum()
}

/// Join step transcripts with single spaces, substituting the placeholder
/// when the trimmed result is empty
fn join_transcripts(steps: &[StepRecord]) -> String {
    let joined = steps
        .iter()
        .map(|step| step.transcript.as_str())
        .collect::<Vec<&str>>()
        .join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        NO_TRANSCRIPT_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Total recording length across steps, rounded to whole seconds
fn total_duration_sec(steps: &[StepRecord]) -> u32 {
    let total: f64 = steps
        .iter()
        .filter_map(|step| step.metrics.as_ref())
        .map(|metrics| metrics.duration_sec)
        .sum();
    total.round().max(0.0) as u32
}
