//! Deterministic fallback generation
//!
//! This module computes the same artifact shapes as the completion provider
//! directly from the metrics summary, using fixed threshold rules. It is the
//! substitute path whenever the provider fails or returns something the
//! extractor cannot recover, so nothing here can fail:
//! - Cards assemble in a fixed order (pace, fillers, pauses, eye contact)
//! - The narrative template never renders an empty section
//! - Question sets come from a fixed keyword table

use crate::extract::MAX_FEEDBACK_CARDS;
use crate::prompt::media_ref;
use crate::types::{CardKind, FeedbackCard, FollowUpQuestion, NarrativeNote, SessionSummary, TargetLevel};

/// Build feedback cards from threshold rules over the summary.
///
/// Each metric contributes at most one card; the sequence is capped at five.
pub fn fallback_feedback_cards(summary: &SessionSummary) -> Vec<FeedbackCard> {
    let mut cards = Vec::new();

    if let Some(card) = pace_card(summary) {
        cards.push(card);
    }
    cards.push(filler_card(summary));
    if let Some(card) = pause_card(summary) {
        cards.push(card);
    }
    if let Some(card) = eye_contact_card(summary) {
        cards.push(card);
    }

    cards.truncate(MAX_FEEDBACK_CARDS);
    cards
}

/// Pace ladder: >160 too fast, 120-160 ideal, under 120 too slow, 0 unmeasured
fn pace_card(summary: &SessionSummary) -> Option<FeedbackCard> {
    let wpm = summary.wpm_avg;
    if wpm > 160.0 {
        Some(FeedbackCard {
            title: "Pace: Speaking a bit fast".to_string(),
            body: format!(
                "You spoke at {wpm:.0} WPM. Try slowing down to 120-150 WPM so listeners \
                 have time to absorb your words."
            ),
            kind: CardKind::Tip,
        })
    } else if wpm >= 120.0 {
        Some(FeedbackCard {
            title: "Pace: Great speaking speed".to_string(),
            body: format!(
                "Excellent pace at {wpm:.0} WPM! This is ideal for clear, engaging communication."
            ),
            kind: CardKind::Praise,
        })
    } else if wpm > 0.0 {
        Some(FeedbackCard {
            title: "Pace: A bit slow".to_string(),
            body: format!(
                "You spoke at {wpm:.0} WPM. Consider picking up the pace slightly to keep \
                 listeners engaged."
            ),
            kind: CardKind::Tip,
        })
    } else {
        None
    }
}

/// Filler ladder: zero is praised, up to 3/min is managed, more gets a tip
fn filler_card(summary: &SessionSummary) -> FeedbackCard {
    if summary.total_fillers == 0 {
        FeedbackCard {
            title: "Fillers: Zero filler words".to_string(),
            body: "Amazing! You used zero filler words. Your speech was clear and confident!"
                .to_string(),
            kind: CardKind::Praise,
        }
    } else if summary.fillers_per_min <= 3.0 {
        FeedbackCard {
            title: "Fillers: Well managed".to_string(),
            body: format!(
                "You used {} filler word(s). That's great control; most people use many more. \
                 Keep it up!",
                summary.total_fillers
            ),
            kind: CardKind::Praise,
        }
    } else {
        FeedbackCard {
            title: "Fillers: Reduce filler words".to_string(),
            body: format!(
                "You used {} filler words ({:.1}/min). Try replacing them with brief pauses instead.",
                summary.total_fillers, summary.fillers_per_min
            ),
            kind: CardKind::Tip,
        }
    }
}

fn pause_card(summary: &SessionSummary) -> Option<FeedbackCard> {
    if summary.pause_count == 0 {
        Some(FeedbackCard {
            title: "Pauses: Consider adding breaks".to_string(),
            body: "You didn't use any pauses. Adding natural pauses gives listeners time to \
                   absorb your message."
                .to_string(),
            kind: CardKind::Tip,
        })
    } else if summary.avg_pause_duration > 0.0 {
        Some(FeedbackCard {
            title: "Pauses: Good use of breaks".to_string(),
            body: format!(
                "Your {} pauses (avg {:.1}s) helped break up your speech naturally.",
                summary.pause_count, summary.avg_pause_duration
            ),
            kind: CardKind::Praise,
        })
    } else {
        None
    }
}

/// Eye contact ladder, only when the session carried a gaze signal
fn eye_contact_card(summary: &SessionSummary) -> Option<FeedbackCard> {
    let ratio = summary.eye_contact_ratio?;
    let percent = (ratio * 100.0).round() as i64;

    let card = if percent >= 70 {
        FeedbackCard {
            title: "Eye Contact: Excellent".to_string(),
            body: format!(
                "{percent}% eye contact! You maintained great connection with your listener."
            ),
            kind: CardKind::Praise,
        }
    } else if percent >= 50 {
        FeedbackCard {
            title: "Eye Contact: Good".to_string(),
            body: format!(
                "{percent}% eye contact is solid. Try maintaining it a bit more for stronger \
                 engagement."
            ),
            kind: CardKind::Tip,
        }
    } else {
        FeedbackCard {
            title: "Eye Contact: Build connection".to_string(),
            body: format!(
                "{percent}% eye contact. Try looking more at the camera or person; it builds \
                 trust and confidence."
            ),
            kind: CardKind::Tip,
        }
    };
    Some(card)
}

/// Build the narrative note from the same threshold rules, assembled into a
/// fixed template. Generic filler text keeps every section non-empty when no
/// specific praise or tip condition fires.
pub fn fallback_narrative_note(summary: &SessionSummary) -> NarrativeNote {
    let scenario = summary.scenario_or_default();
    let praise = praise_fragments(summary);
    let tips = tip_fragments(summary);

    let praise = if praise.is_empty() {
        "You gave it a great effort! ".to_string()
    } else {
        praise
    };
    let tips = if tips.is_empty() {
        "You're doing well; just keep being consistent with your practice. ".to_string()
    } else {
        tips
    };

    let body = format!(
        "Hey there! 🎉\n\n\
         I just reviewed your practice session for {scenario} at Level {level}, and I want to \
         give you some feedback!\n\n\
         {praise}Keep practicing and you'll keep getting better. 💪\n\n\
         {tips}\n\n\
         Remember, every practice session is a step forward. I'm proud of you for taking the \
         time to work on your communication skills! ✨\n\n\
         See you next time!",
        level = summary.level,
    );

    NarrativeNote {
        title: format!("{} : Level {}", scenario, summary.level),
        body,
    }
}

fn praise_fragments(summary: &SessionSummary) -> String {
    let mut praise = String::new();

    if summary.wpm_avg >= 120.0 && summary.wpm_avg <= 160.0 {
        praise.push_str(&format!(
            "Your speaking pace was great at {:.0} WPM! ",
            summary.wpm_avg
        ));
    }
    if summary.total_fillers == 0 {
        praise.push_str("I loved that you spoke clearly without any filler words! ");
    } else if summary.total_fillers <= 3 {
        praise.push_str("You kept filler words to a minimum, and that's excellent control! ");
    }
    if matches!(summary.eye_contact_ratio, Some(ratio) if ratio >= 0.7) {
        praise.push_str("Your eye contact was fantastic! ");
    }

    praise
}

fn tip_fragments(summary: &SessionSummary) -> String {
    let mut tips = String::new();

    if summary.wpm_avg > 160.0 {
        tips.push_str(
            "Try slowing down your pace a bit next time to give listeners more time to absorb \
             your words. ",
        );
    } else if summary.wpm_avg > 0.0 && summary.wpm_avg < 120.0 {
        tips.push_str("Next time, try speaking a bit faster to keep listeners engaged. ");
    }
    if summary.fillers_per_min > 3.0 {
        tips.push_str(
            "If you catch yourself using filler words, try replacing them with a brief pause \
             instead. ",
        );
    }
    if summary.pause_count == 0 && summary.fillers_per_min > 0.0 {
        tips.push_str("Adding natural pauses between thoughts can help you avoid filler words. ");
    }
    if matches!(summary.eye_contact_ratio, Some(ratio) if ratio < 0.5) {
        tips.push_str(
            "Try maintaining eye contact more consistently; it helps build connection. ",
        );
    }

    tips
}

/// A canned question set for one scenario keyword
struct QuestionSet {
    keyword: &'static str,
    level2: [&'static str; 3],
    level3: [&'static str; 2],
}

// Ordered table; substring match against the lower-cased scenario title,
// first match wins, unmatched titles use the first entry's set.
const QUESTION_SETS: [QuestionSet; 3] = [
    QuestionSet {
        keyword: "coffee",
        level2: [
            "Would you like to add any pastries to your order today?",
            "How do you usually take your coffee: black, with milk, or with cream?",
            "Would you like your drink for here or to go?",
        ],
        level3: [
            "I see you order here regularly. What draws you to this coffee shop specifically, \
             and how would you compare our coffee to other places you've tried?",
            "Beyond our coffee selection, is there anything else we could improve to make your \
             experience here even better?",
        ],
    },
    QuestionSet {
        keyword: "restaurant",
        level2: [
            "How many guests will be dining with us today?",
            "Do you have any dietary restrictions I should know about?",
            "Would you like to start with any appetizers or drinks?",
        ],
        level3: [
            "Are you celebrating any special occasion tonight, and do you have any preferences \
             regarding seating or ambiance?",
            "Have you dined with us before, and if so, are there any dishes from your previous \
             visits that you'd like to have again tonight?",
        ],
    },
    QuestionSet {
        keyword: "interview",
        level2: [
            "Can you tell me about a time you overcame a challenge at work?",
            "How do you handle working with difficult team members?",
            "What are your long-term career goals?",
        ],
        level3: [
            "Can you walk me through a specific project where you demonstrated leadership, and \
             how did that experience shape your approach to team management?",
            "Tell me about a time when you had to adapt your communication style to work with \
             someone very different from you, and what did you learn from that experience?",
        ],
    },
];

/// Build follow-up questions from the canned table, keyed by scenario
/// keyword and truncated to the exact count the target level requires.
pub fn fallback_questions(
    scenario_title: Option<&str>,
    target: TargetLevel,
) -> Vec<FollowUpQuestion> {
    let scenario = scenario_title.unwrap_or("Practice");
    let lower = scenario.to_lowercase();

    let set = QUESTION_SETS
        .iter()
        .find(|set| lower.contains(set.keyword))
        .unwrap_or(&QUESTION_SETS[0]);

    let texts: &[&str] = match target {
        TargetLevel::Two => &set.level2,
        TargetLevel::Three => &set.level3,
    };

    texts
        .iter()
        .take(target.question_count())
        .enumerate()
        .map(|(idx, text)| {
            let order = idx as u32 + 1;
            FollowUpQuestion {
                order,
                text: (*text).to_string(),
                media_ref: media_ref(scenario, target, order),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_summary() -> SessionSummary {
        SessionSummary {
            wpm_avg: 145.0,
            fillers_per_min: 1.0,
            total_fillers: 2,
            pause_count: 3,
            avg_pause_duration: 1.2,
            eye_contact_ratio: Some(0.82),
            overall_score: 88.0,
            transcript: "I would like a latte please.".to_string(),
            duration_sec: 95,
            scenario_title: Some("Morning Coffee Order".to_string()),
            level: 1,
        }
    }

    #[test]
    fn test_fast_pace_yields_single_tip() {
        let mut summary = make_summary();
        summary.wpm_avg = 170.0;
        let cards = fallback_feedback_cards(&summary);

        let pace_cards: Vec<&FeedbackCard> = cards
            .iter()
            .filter(|card| card.title.starts_with("Pace"))
            .collect();
        assert_eq!(pace_cards.len(), 1);
        assert_eq!(pace_cards[0].kind, CardKind::Tip);
        assert!(pace_cards[0].title.contains("fast"));
    }

    #[test]
    fn test_ideal_pace_yields_praise() {
        let mut summary = make_summary();
        summary.wpm_avg = 140.0;
        let cards = fallback_feedback_cards(&summary);

        let pace = cards.iter().find(|card| card.title.starts_with("Pace")).unwrap();
        assert_eq!(pace.kind, CardKind::Praise);
        assert!(pace.body.contains("140 WPM"));
    }

    #[test]
    fn test_zero_wpm_yields_no_pace_card() {
        let mut summary = make_summary();
        summary.wpm_avg = 0.0;
        let cards = fallback_feedback_cards(&summary);
        assert!(!cards.iter().any(|card| card.title.starts_with("Pace")));
    }

    #[test]
    fn test_zero_fillers_praised_explicitly() {
        let mut summary = make_summary();
        summary.total_fillers = 0;
        let cards = fallback_feedback_cards(&summary);

        let filler = cards.iter().find(|card| card.title.starts_with("Fillers")).unwrap();
        assert_eq!(filler.kind, CardKind::Praise);
        assert!(filler.title.to_lowercase().contains("zero"));
        assert!(filler.body.to_lowercase().contains("zero"));
    }

    #[test]
    fn test_heavy_fillers_get_reduction_tip() {
        let mut summary = make_summary();
        summary.total_fillers = 12;
        summary.fillers_per_min = 7.6;
        let cards = fallback_feedback_cards(&summary);

        let filler = cards.iter().find(|card| card.title.starts_with("Fillers")).unwrap();
        assert_eq!(filler.kind, CardKind::Tip);
        assert!(filler.body.contains("12 filler words"));
        assert!(filler.body.contains("7.6/min"));
    }

    #[test]
    fn test_card_order_is_fixed() {
        let cards = fallback_feedback_cards(&make_summary());
        let titles: Vec<&str> = cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Pace: Great speaking speed",
                "Fillers: Well managed",
                "Pauses: Good use of breaks",
                "Eye Contact: Excellent",
            ]
        );
    }

    #[test]
    fn test_all_praise_session_yields_four_praise_cards() {
        let cards = fallback_feedback_cards(&make_summary());
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|card| card.kind == CardKind::Praise));
    }

    #[test]
    fn test_missing_eye_contact_omits_card() {
        let mut summary = make_summary();
        summary.eye_contact_ratio = None;
        let cards = fallback_feedback_cards(&summary);
        assert!(!cards.iter().any(|card| card.title.contains("Eye Contact")));
    }

    #[test]
    fn test_cards_never_exceed_cap() {
        let cards = fallback_feedback_cards(&make_summary());
        assert!(cards.len() <= MAX_FEEDBACK_CARDS);
        assert!(!cards.is_empty());
    }

    #[test]
    fn test_note_mentions_scenario_and_level() {
        let note = fallback_narrative_note(&make_summary());
        assert_eq!(note.title, "Morning Coffee Order : Level 1");
        assert!(note.body.contains("Morning Coffee Order at Level 1"));
    }

    #[test]
    fn test_note_never_mentions_unmeasured_eye_contact() {
        let mut summary = make_summary();
        summary.eye_contact_ratio = None;
        let note = fallback_narrative_note(&summary);
        assert!(!note.body.to_lowercase().contains("eye contact"));
    }

    #[test]
    fn test_note_sections_never_empty_on_bare_summary() {
        let summary = SessionSummary {
            wpm_avg: 0.0,
            fillers_per_min: 0.0,
            total_fillers: 5,
            pause_count: 1,
            avg_pause_duration: 2.0,
            eye_contact_ratio: None,
            overall_score: 0.0,
            transcript: "hi".to_string(),
            duration_sec: 4,
            scenario_title: None,
            level: 1,
        };
        let note = fallback_narrative_note(&summary);
        assert!(note.body.contains("You gave it a great effort!"));
        assert!(note.body.contains("keep being consistent"));
        assert!(note.body.contains("Practice at Level 1"));
    }

    #[test]
    fn test_coffee_level2_questions() {
        let questions = fallback_questions(Some("Morning Coffee Order"), TargetLevel::Two);
        assert_eq!(questions.len(), 3);
        for (idx, question) in questions.iter().enumerate() {
            assert_eq!(question.order, idx as u32 + 1);
            assert!(question.media_ref.contains("coffee"));
            assert!(question.media_ref.contains("level2"));
            assert!(!question.text.is_empty());
        }
        assert_eq!(questions[0].media_ref, "morning_coffee_order_level2_q1.mp4");
    }

    #[test]
    fn test_level3_always_two_questions() {
        for scenario in [Some("Job Interview"), Some("Something Unmatched"), None] {
            let questions = fallback_questions(scenario, TargetLevel::Three);
            assert_eq!(questions.len(), 2);
        }
    }

    #[test]
    fn test_unmatched_scenario_uses_default_set() {
        let questions = fallback_questions(Some("Team Standup"), TargetLevel::Two);
        assert_eq!(
            questions[0].text,
            "Would you like to add any pastries to your order today?"
        );
        assert_eq!(questions[0].media_ref, "team_standup_level2_q1.mp4");
    }

    #[test]
    fn test_first_match_wins_for_multi_keyword_titles() {
        // "coffee" sits before "interview" in the table
        let questions = fallback_questions(Some("Coffee Shop Job Interview"), TargetLevel::Two);
        assert!(questions[0].text.contains("pastries"));
    }
}
