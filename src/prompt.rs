//! Prompt construction
//!
//! Pure functions mapping a session summary to instruction text for the
//! completion provider. Prompts are deterministic: identical summaries
//! produce byte-identical text. Each prompt ends with a strict JSON output
//! contract so the extractor has a stable shape to recover.

use std::fmt::Write;

use crate::types::{SessionSummary, TargetLevel};

/// Voice the follow-up questions are asked in, chosen from the scenario title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Staff addressing the user as a customer (restaurant, cafe, shopping)
    ServiceStaff,
    /// Interviewer addressing the user as a candidate
    Interviewer,
    /// Neutral facilitator guiding the user
    Facilitator,
}

// Ordered keyword tables; first match wins, facilitator is the default.
const SERVICE_KEYWORDS: [&str; 4] = ["restaurant", "cafe", "coffee", "shopping"];
const INTERVIEW_KEYWORDS: [&str; 3] = ["interview", "job", "hiring"];

impl AddressMode {
    /// Pick the address mode by substring scan over the lower-cased title
    pub fn from_scenario(title: &str) -> Self {
        let lower = title.to_lowercase();
        if SERVICE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            AddressMode::ServiceStaff
        } else if INTERVIEW_KEYWORDS.iter().any(|k| lower.contains(k)) {
            AddressMode::Interviewer
        } else {
            AddressMode::Facilitator
        }
    }
}

/// Lower-cased scenario title with non-alphanumeric runs collapsed to `_`
pub fn media_slug(scenario_title: &str) -> String {
    let lower = scenario_title.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_run = false;
    for ch in lower.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            in_run = false;
        } else if !in_run {
            slug.push('_');
            in_run = true;
        }
    }
    slug
}

/// Deterministic media reference for one question of a target level
pub fn media_ref(scenario_title: &str, target: TargetLevel, order: u32) -> String {
    format!(
        "{}_level{}_q{}.mp4",
        media_slug(scenario_title),
        target.as_u8(),
        order
    )
}

fn eye_contact_display(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{}%", (r * 100.0).round() as i64),
        None => "Not available".to_string(),
    }
}

/// Instruction payload for the feedback-card artifact.
///
/// Embeds all six core metrics and the transcript, the card-type decision
/// rule, and the `{"cards": [...]}` output contract.
pub fn feedback_cards_prompt(summary: &SessionSummary) -> String {
    let mut prompt = String::with_capacity(1536);

    prompt.push_str(
        "Analyze this practice session and generate 4-5 specific, actionable feedback cards.\n\n",
    );

    let _ = write!(
        prompt,
        "**Session Metrics:**\n\
         - Speaking Pace: {:.0} WPM\n\
         - Filler Words: {} total ({:.1} per minute)\n\
         - Pauses: {} pauses (avg {:.1}s each)\n\
         - Eye Contact: {}\n\
         - Overall Score: {:.0}/100\n\
         - Duration: {}s\n\n",
        summary.wpm_avg,
        summary.total_fillers,
        summary.fillers_per_min,
        summary.pause_count,
        summary.avg_pause_duration,
        eye_contact_display(summary.eye_contact_ratio),
        summary.overall_score,
        summary.duration_sec,
    );

    let _ = write!(prompt, "**What they said:**\n\"{}\"\n\n", summary.transcript);

    prompt.push_str(
        "**Generate 4-5 feedback cards covering:**\n\
         1. **Pace** - Comment on speaking speed (ideal: 120-160 WPM)\n\
         2. **Eye Contact** - If available, comment on eye contact\n\
         3. **Fillers** - Comment on filler word usage (ideal: <3 per minute)\n\
         4. **Pauses** - Comment on pause frequency and length\n\
         5. **Answer Quality** - Comment on their answer content and clarity\n\n\
         **Card Guidelines:**\n\
         - Be specific and actionable\n\
         - Use an encouraging, supportive tone\n\
         - Focus on ONE thing per card\n\
         - If something is good, use type \"praise\"\n\
         - If something needs work but is not critical, use \"tip\"\n\
         - If something is concerning, use \"warning\"\n\
         - Keep the body to 2-3 sentences max\n\n\
         Format as **pure JSON**:\n\
         {\n\
         \x20 \"cards\": [\n\
         \x20   {\n\
         \x20     \"title\": \"Clear, specific title (3-5 words)\",\n\
         \x20     \"body\": \"Specific, actionable feedback. Include the actual metric.\",\n\
         \x20     \"type\": \"tip\" | \"praise\" | \"warning\"\n\
         \x20   }\n\
         \x20 ]\n\
         }",
    );

    prompt
}

/// Instruction payload for the narrative-note artifact.
///
/// Metric lines are included only when meaningful, so the generator can
/// never reference a metric that was withheld.
pub fn narrative_note_prompt(summary: &SessionSummary) -> String {
    let scenario = summary.scenario_or_default();
    let has_transcript = summary.has_transcript();

    let mut metrics = String::with_capacity(256);
    let _ = write!(
        metrics,
        "**Session:**\n- Scenario: {} (Level {})",
        scenario, summary.level
    );
    if summary.wpm_avg > 0.0 {
        let _ = write!(metrics, "\n- Speaking Pace: {:.0} WPM", summary.wpm_avg);
    }
    if summary.total_fillers > 0 {
        let _ = write!(
            metrics,
            "\n- Filler Words: {} total ({:.1} per minute)",
            summary.total_fillers, summary.fillers_per_min
        );
    }
    if let Some(ratio) = summary.eye_contact_ratio {
        let _ = write!(metrics, "\n- Eye Contact: {}", eye_contact_display(Some(ratio)));
    }
    if summary.pause_count > 0 {
        let _ = write!(
            metrics,
            "\n- Pauses: {} (avg {:.1}s each)",
            summary.pause_count, summary.avg_pause_duration
        );
    }

    let mut prompt = String::with_capacity(1536);

    prompt.push_str(
        "You are Pipo, the main character of this app. You reviewed the conversation where \
         someone was practicing by answering questions. You are NOT part of the conversation - \
         you are an observer who watched and analyzed their performance. Now, write a warm, \
         encouraging note giving feedback to the person who answered the questions.\n\n",
    );

    prompt.push_str(&metrics);
    if has_transcript {
        let _ = write!(prompt, "\n\n**What they said:**\n\"{}\"", summary.transcript);
    }

    prompt.push_str(
        "\n\n**Write Pipo's note:**\n\
         - You are Pipo, giving feedback after reviewing their practice session\n\
         - Start with \"Hey there! \" or a similar friendly greeting\n\
         - Write as if you observed and reviewed their conversation\n\
         - Celebrate what they did well (be specific with the metrics provided above)\n",
    );
    if has_transcript {
        prompt.push_str("- Include a short snippet or reference to what they said (if appropriate)\n");
    }
    prompt.push_str(
        "- Give 1-2 gentle tips for improvement based on the metrics\n\
         - End with encouraging words\n\
         - Use emojis naturally (but not too many)\n\
         - Keep it warm, personal, and supportive\n\
         - Length: 200-300 words\n\
         - IMPORTANT: Only mention metrics that were provided above. Do NOT mention scores, \
         transcripts, or fillers if they were not included.\n\
         - IMPORTANT: You are giving feedback to the person who answered the questions, not \
         the person asking them.\n\n",
    );

    let _ = write!(
        prompt,
        "Format as **pure JSON**:\n\
         {{\n\
         \x20 \"title\": \"{} : Level {}\",\n\
         \x20 \"body\": \"The complete note with \\n\\n for paragraph breaks\"\n\
         }}",
        scenario, summary.level
    );

    prompt
}

/// Instruction payload for the next-level-questions artifact.
///
/// The question count is fixed by the target level and is not
/// generator-negotiable; the address mode comes from the scenario title.
pub fn next_level_questions_prompt(summary: &SessionSummary, target: TargetLevel) -> String {
    let scenario = summary.scenario_or_default();
    let count = target.question_count();
    let mode = AddressMode::from_scenario(scenario);

    let mut prompt = String::with_capacity(1536);

    let _ = write!(
        prompt,
        "Create exactly {} next-step questions for a user practicing \"{}\".\n\n\
         Context:\n\
         - Current Level: {}\n\
         - Next Level: {}\n\
         - Transcript (what they said): \"{}\"\n\n",
        count,
        scenario,
        summary.level,
        target.as_u8(),
        summary.transcript,
    );

    match target {
        TargetLevel::Two => prompt.push_str(
            "IMPORTANT FOR LEVEL 2 (Intermediate):\n\
             - These questions are moderately advanced but still straightforward\n\
             - Ask about preferences, options, and basic follow-up information\n\
             - Keep questions clear and direct\n\
             - Each question should be answerable in 1-2 sentences\n\n",
        ),
        TargetLevel::Three => prompt.push_str(
            "IMPORTANT FOR LEVEL 3 (Advanced):\n\
             - These questions should be SIGNIFICANTLY MORE CHALLENGING than Level 2\n\
             - Ask about deeper reasoning, past experiences, or nuanced preferences\n\
             - Ask \"why\" and \"how\" questions that require more thoughtful responses\n\
             - Questions can be longer and more complex than Level 2\n\n",
        ),
    }

    prompt.push_str("Guidelines:\n");
    match (mode, target) {
        (AddressMode::ServiceStaff, TargetLevel::Two) => prompt.push_str(
            "- Write as STAFF addressing the user (customer). \
             Preferred patterns: \"Would you like...\", \"Do you prefer...\"\n",
        ),
        (AddressMode::ServiceStaff, TargetLevel::Three) => prompt.push_str(
            "- Write as STAFF addressing the user (customer). \
             Preferred patterns: \"What draws you to...\", \"How would you compare...\"\n",
        ),
        (AddressMode::Interviewer, TargetLevel::Two) => prompt.push_str(
            "- Write as the INTERVIEWER addressing the candidate. \
             Preferred patterns: \"Can you tell me...\", \"How did you...\", \"What would you...\"\n",
        ),
        (AddressMode::Interviewer, TargetLevel::Three) => prompt.push_str(
            "- Write as the INTERVIEWER addressing the candidate. \
             Preferred patterns: \"Can you walk me through...\", \"Tell me about a time when...\"\n",
        ),
        (AddressMode::Facilitator, TargetLevel::Two) => prompt.push_str(
            "- Write as a FACILITATOR guiding the user. \
             Preferred patterns: \"Could you try...\", \"Tell me about...\"\n",
        ),
        (AddressMode::Facilitator, TargetLevel::Three) => prompt.push_str(
            "- Write as a FACILITATOR guiding the user. \
             Preferred patterns: \"What would happen if...\", \"How did that shape...\"\n",
        ),
    }

    let _ = write!(
        prompt,
        "- Use \"you\" to refer to the user. Do NOT flip the roles into the user asking questions.\n\
         - IMPORTANT: Questions must be INDEPENDENT and self-contained. Each question should \
         stand alone and make sense.\n\
         - Questions should be appropriate for the scenario\n\
         - Include a videoUrl placeholder like \"{}_level{}_q{{n}}.mp4\"\n\
         - Provide an ordered list starting at 1.\n\n\
         Return JSON only:\n\
         {{\n\
         \x20 \"questions\": [\n\
         \x20   {{ \"order\": 1, \"text\": \"...\", \"videoUrl\": \"...\" }}\n\
         \x20 ]\n\
         }}",
        media_slug(scenario),
        target.as_u8(),
    );

    prompt
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
            transcript: "I have five years of experience leading small teams.".to_string(),
            duration_sec: 95,
            scenario_title: Some("Job Interview".to_string()),
            level: 1,
        }
    }

    #[test]
    fn test_prompts_are_pure_functions() {
        let summary = make_summary();
        assert_eq!(feedback_cards_prompt(&summary), feedback_cards_prompt(&summary));
        assert_eq!(narrative_note_prompt(&summary), narrative_note_prompt(&summary));
        assert_eq!(
            next_level_questions_prompt(&summary, TargetLevel::Two),
            next_level_questions_prompt(&summary, TargetLevel::Two)
        );
    }

    #[test]
    fn test_feedback_prompt_embeds_all_metrics() {
        let prompt = feedback_cards_prompt(&make_summary());

        assert!(prompt.contains("145 WPM"));
        assert!(prompt.contains("2 total (1.0 per minute)"));
        assert!(prompt.contains("3 pauses (avg 1.2s each)"));
        assert!(prompt.contains("Eye Contact: 82%"));
        assert!(prompt.contains("88/100"));
        assert!(prompt.contains("Duration: 95s"));
        assert!(prompt.contains("five years of experience"));
        assert!(prompt.contains("\"cards\""));
    }

    #[test]
    fn test_feedback_prompt_marks_unmeasured_eye_contact() {
        let mut summary = make_summary();
        summary.eye_contact_ratio = None;
        let prompt = feedback_cards_prompt(&summary);
        assert!(prompt.contains("Eye Contact: Not available"));
    }

    #[test]
    fn test_narrative_prompt_withholds_empty_metrics() {
        let mut summary = make_summary();
        summary.wpm_avg = 0.0;
        summary.total_fillers = 0;
        summary.eye_contact_ratio = None;
        summary.pause_count = 0;
        summary.transcript = crate::types::NO_TRANSCRIPT_PLACEHOLDER.to_string();

        let prompt = narrative_note_prompt(&summary);
        assert!(!prompt.contains("Speaking Pace"));
        assert!(!prompt.contains("Filler Words"));
        assert!(!prompt.contains("Eye Contact"));
        assert!(!prompt.contains("- Pauses:"));
        assert!(!prompt.contains("What they said"));
        // Scenario and level are always present
        assert!(prompt.contains("Job Interview (Level 1)"));
    }

    #[test]
    fn test_narrative_prompt_includes_meaningful_metrics() {
        let prompt = narrative_note_prompt(&make_summary());
        assert!(prompt.contains("Speaking Pace: 145 WPM"));
        assert!(prompt.contains("Filler Words: 2 total (1.0 per minute)"));
        assert!(prompt.contains("Eye Contact: 82%"));
        assert!(prompt.contains("Pauses: 3 (avg 1.2s each)"));
        assert!(prompt.contains("What they said"));
        assert!(prompt.contains("Job Interview : Level 1"));
    }

    #[test]
    fn test_questions_prompt_fixes_count_by_level() {
        let summary = make_summary();
        let level2 = next_level_questions_prompt(&summary, TargetLevel::Two);
        assert!(level2.contains("Create exactly 3 next-step questions"));
        assert!(level2.contains("LEVEL 2 (Intermediate)"));

        let level3 = next_level_questions_prompt(&summary, TargetLevel::Three);
        assert!(level3.contains("Create exactly 2 next-step questions"));
        assert!(level3.contains("LEVEL 3 (Advanced)"));
    }

    #[test]
    fn test_questions_prompt_selects_interviewer_voice() {
        let prompt = next_level_questions_prompt(&make_summary(), TargetLevel::Two);
        assert!(prompt.contains("INTERVIEWER addressing the candidate"));
        assert!(prompt.contains("job_interview_level2_q{n}.mp4"));
    }

    #[test]
    fn test_address_mode_keyword_match() {
        assert_eq!(
            AddressMode::from_scenario("Morning Coffee Order"),
            AddressMode::ServiceStaff
        );
        assert_eq!(
            AddressMode::from_scenario("Dinner at a Restaurant"),
            AddressMode::ServiceStaff
        );
        assert_eq!(AddressMode::from_scenario("Job Interview"), AddressMode::Interviewer);
        assert_eq!(AddressMode::from_scenario("Team Standup"), AddressMode::Facilitator);
    }

    #[test]
    fn test_media_slug_collapses_non_alphanumeric_runs() {
        assert_eq!(media_slug("Morning Coffee Order"), "morning_coffee_order");
        assert_eq!(media_slug("Cafe -- Chat!"), "cafe_chat_");
        assert_eq!(
            media_ref("Morning Coffee Order", TargetLevel::Two, 1),
            "morning_coffee_order_level2_q1.mp4"
        );
    }
}
