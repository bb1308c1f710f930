//! Response extraction
//!
//! This module recovers structured artifacts from loosely structured
//! completion text: strip Markdown code fences, locate the JSON object span,
//! parse, validate the shape. The span recovery (first `{` to last `}`) is a
//! best-effort heuristic for well-behaved generator output, not a general
//! parser; anything it cannot recover becomes an `Extraction` error and the
//! orchestrator falls back to rule-based output.

use serde::Deserialize;

use crate::error::CoachError;
use crate::types::{FeedbackCard, FollowUpQuestion, NarrativeNote, TargetLevel};

/// Upper bound on cards handed back to callers
pub const MAX_FEEDBACK_CARDS: usize = 5;

#[derive(Deserialize)]
struct CardsEnvelope {
    cards: Vec<FeedbackCard>,
}

#[derive(Deserialize)]
struct NoteEnvelope {
    title: String,
    body: String,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<FollowUpQuestion>,
}

/// Remove a surrounding Markdown code fence (```json ... ```) if present
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) up to the first newline
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Locate the first-`{`-to-last-`}` object span in completion text
fn json_span(raw: &str) -> Result<&str, CoachError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(CoachError::Extraction("completion text was empty".to_string()));
    }

    let start = cleaned
        .find('{')
        .ok_or_else(|| CoachError::Extraction("no JSON object found in completion text".to_string()))?;
    let end = cleaned
        .rfind('}')
        .filter(|&end| end >= start)
        .ok_or_else(|| CoachError::Extraction("unterminated JSON object in completion text".to_string()))?;

    Ok(&cleaned[start..=end])
}

/// Recover the feedback-card list from raw completion text.
///
/// Shape contract: `{"cards": [{title, body, type}, ...]}`, non-empty,
/// truncated to at most five cards.
pub fn extract_feedback_cards(raw: &str) -> Result<Vec<FeedbackCard>, CoachError> {
    let envelope: CardsEnvelope = serde_json::from_str(json_span(raw)?)?;
    if envelope.cards.is_empty() {
        return Err(CoachError::Extraction("cards array was empty".to_string()));
    }

    let mut cards = envelope.cards;
    if cards.len() > MAX_FEEDBACK_CARDS {
        log::debug!("truncating {} generated cards to {}", cards.len(), MAX_FEEDBACK_CARDS);
        cards.truncate(MAX_FEEDBACK_CARDS);
    }
    Ok(cards)
}

/// Recover the narrative note from raw completion text.
///
/// Shape contract: `{"title": ..., "body": ...}`, both non-blank.
pub fn extract_narrative_note(raw: &str) -> Result<NarrativeNote, CoachError> {
    let envelope: NoteEnvelope = serde_json::from_str(json_span(raw)?)?;
    if envelope.title.trim().is_empty() || envelope.body.trim().is_empty() {
        return Err(CoachError::Extraction(
            "note title or body was blank".to_string(),
        ));
    }
    Ok(NarrativeNote {
        title: envelope.title,
        body: envelope.body,
    })
}

/// Recover the follow-up question list from raw completion text.
///
/// The parsed array is truncated (never padded) to the exact count the
/// target level requires; a shortfall is accepted and logged rather than
/// treated as a failure.
pub fn extract_questions(
    raw: &str,
    target: TargetLevel,
) -> Result<Vec<FollowUpQuestion>, CoachError> {
    let envelope: QuestionsEnvelope = serde_json::from_str(json_span(raw)?)?;
    let required = target.question_count();

    let mut questions = envelope.questions;
    if questions.len() > required {
        questions.truncate(required);
    }
    if questions.len() < required {
        log::warn!(
            "expected {} level-{} questions but generator returned {}; accepting shortfall",
            required,
            target.as_u8(),
            questions.len()
        );
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardKind;
    use pretty_assertions::assert_eq;

    const CARDS_JSON: &str = r#"{
        "cards": [
            {"title": "Pace: Great speed", "body": "145 WPM is ideal.", "type": "praise"},
            {"title": "Fillers: Well managed", "body": "Only 2 fillers.", "type": "praise"}
        ]
    }"#;

    #[test]
    fn test_extracts_cards_from_fenced_block() {
        let raw = format!("```json\n{}\n```", CARDS_JSON);
        let cards = extract_feedback_cards(&raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Pace: Great speed");
        assert_eq!(cards[0].kind, CardKind::Praise);
    }

    #[test]
    fn test_extracts_cards_with_prose_around_span() {
        let raw = format!("Here is your feedback:\n{}\nHope that helps!", CARDS_JSON);
        let cards = extract_feedback_cards(&raw).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_no_brace_raises_extraction() {
        let err = extract_feedback_cards("I could not produce feedback.").unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    #[test]
    fn test_empty_text_raises_extraction() {
        let err = extract_feedback_cards("   ").unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    #[test]
    fn test_malformed_json_raises_extraction() {
        let err = extract_feedback_cards("{\"cards\": [").unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    #[test]
    fn test_empty_cards_array_raises_extraction() {
        let err = extract_feedback_cards(r#"{"cards": []}"#).unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    #[test]
    fn test_cards_truncated_to_cap() {
        let card = r#"{"title": "t", "body": "b", "type": "tip"}"#;
        let raw = format!(
            r#"{{"cards": [{}, {}, {}, {}, {}, {}, {}]}}"#,
            card, card, card, card, card, card, card
        );
        let cards = extract_feedback_cards(&raw).unwrap();
        assert_eq!(cards.len(), MAX_FEEDBACK_CARDS);
    }

    #[test]
    fn test_extracts_note() {
        let raw = "```json\n{\"title\": \"Practice : Level 1\", \"body\": \"Nice work!\"}\n```";
        let note = extract_narrative_note(raw).unwrap();
        assert_eq!(note.title, "Practice : Level 1");
        assert_eq!(note.body, "Nice work!");
    }

    #[test]
    fn test_blank_note_body_raises_extraction() {
        let err = extract_narrative_note(r#"{"title": "Practice", "body": "  "}"#).unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    fn question_json(order: u32) -> String {
        format!(
            r#"{{"order": {order}, "text": "Question {order}?", "videoUrl": "coffee_level2_q{order}.mp4"}}"#
        )
    }

    #[test]
    fn test_questions_truncated_to_required_count() {
        let raw = format!(
            r#"{{"questions": [{}, {}, {}, {}]}}"#,
            question_json(1),
            question_json(2),
            question_json(3),
            question_json(4)
        );
        let questions = extract_questions(&raw, TargetLevel::Two).unwrap();
        assert_eq!(questions.len(), 3);

        let questions = extract_questions(&raw, TargetLevel::Three).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].order, 2);
    }

    #[test]
    fn test_question_shortfall_is_accepted() {
        let raw = format!(r#"{{"questions": [{}]}}"#, question_json(1));
        let questions = extract_questions(&raw, TargetLevel::Two).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_question_missing_field_raises_extraction() {
        let raw = r#"{"questions": [{"order": 1, "text": "Where to?"}]}"#;
        let err = extract_questions(raw, TargetLevel::Two).unwrap_err();
        assert!(matches!(err, CoachError::Extraction(_)));
    }

    #[test]
    fn test_fence_without_newline_is_stripped() {
        let raw = "```{\"title\": \"T\", \"body\": \"B\"}```";
        let note = extract_narrative_note(raw).unwrap();
        assert_eq!(note.title, "T");
    }
}
